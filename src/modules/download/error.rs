use crate::infrastructure::media::MuxError;
use crate::infrastructure::platform::PlatformError;
use crate::infrastructure::storage::StorageError;
use thiserror::Error;

/// Anything that can go wrong between URL validation and the response.
/// Every variant maps to a 500.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("S3 client not initialized. Check AWS credentials and S3 bucket configuration.")]
    StorageUnavailable,

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Could not find suitable 1080p video or audio stream for merging. Try a lower quality or a different video.")]
    NoSuitableStream,

    #[error("stream download failed: {0}")]
    Download(#[source] PlatformError),

    #[error(transparent)]
    Merge(#[from] MuxError),

    #[error("Video download or merge failed; no final video file found on server.")]
    MissingOutput,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
}
