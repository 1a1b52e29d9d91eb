use crate::modules::download::model::{StreamDescriptor, VideoSource};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub mod ytdlp;

/// Desktop browser user agent sent on lookups and stream downloads.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to run yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("video lookup timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    Lookup(String),

    #[error("invalid video metadata: {0}")]
    Parse(String),

    #[error("{0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves a watch URL to metadata plus its stream list, and fetches streams.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<VideoSource, PlatformError>;

    async fn download(&self, stream: &StreamDescriptor, dest: &Path) -> Result<(), PlatformError>;
}
