use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub mod ffmpeg;

#[derive(Debug, Error)]
pub enum MuxError {
    #[error("failed to run ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Combines a video-only and an audio-only file into one container.
#[async_trait]
pub trait Muxer: Send + Sync {
    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MuxError>;
}
