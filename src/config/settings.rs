use crate::config::env::{self, EnvKey};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct S3Settings {
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
}

impl fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Settings")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    /// Shared secret expected in `X-API-Key`. `None` disables the check.
    pub api_key: Option<String>,
    /// `None` when any of the four S3 variables is missing; uploads are then disabled.
    pub storage: Option<S3Settings>,
    pub ytdlp_path: String,
    pub ffmpeg_path: String,
    pub download_tmp_dir: PathBuf,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::from_lookup(env::get_non_empty)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(EnvKey) -> Option<String>,
    {
        let storage = match (
            lookup(EnvKey::AwsAccessKeyId),
            lookup(EnvKey::AwsSecretAccessKey),
            lookup(EnvKey::S3Bucket),
            lookup(EnvKey::AwsRegion),
        ) {
            (Some(access_key), Some(secret_key), Some(bucket), Some(region)) => Some(S3Settings {
                access_key,
                secret_key,
                bucket,
                region,
                endpoint: lookup(EnvKey::S3Endpoint),
            }),
            _ => None,
        };

        Self {
            server_port: lookup(EnvKey::ServerPort)
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            api_key: lookup(EnvKey::ApiKey),
            storage,
            ytdlp_path: lookup(EnvKey::YtDlpPath).unwrap_or_else(|| "yt-dlp".to_string()),
            ffmpeg_path: lookup(EnvKey::FfmpegPath).unwrap_or_else(|| "ffmpeg".to_string()),
            download_tmp_dir: lookup(EnvKey::DownloadTmpDir)
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        }
    }
}
