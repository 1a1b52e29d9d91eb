use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvKey {
    ServerPort,
    ApiKey,
    AwsAccessKeyId,
    AwsSecretAccessKey,
    S3Bucket,
    AwsRegion,
    S3Endpoint,
    YtDlpPath,
    FfmpegPath,
    DownloadTmpDir,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "PORT",
            EnvKey::ApiKey => "API_KEY",
            EnvKey::AwsAccessKeyId => "AWS_ACCESS_KEY_ID",
            EnvKey::AwsSecretAccessKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::S3Bucket => "S3_BUCKET_NAME",
            EnvKey::AwsRegion => "AWS_DEFAULT_REGION",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::YtDlpPath => "YTDLP_PATH",
            EnvKey::FfmpegPath => "FFMPEG_PATH",
            EnvKey::DownloadTmpDir => "DOWNLOAD_TMP_DIR",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

/// Empty values count as unset. Whitespace is kept as-is, so a `" "` API key still guards the route.
pub fn get_non_empty(key: EnvKey) -> Option<String> {
    non_empty(get(key).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
