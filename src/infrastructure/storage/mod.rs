use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub mod s3;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Presigning failed: {0}")]
    PresignFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()>;

    /// Time-limited GET URL for `key`.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
