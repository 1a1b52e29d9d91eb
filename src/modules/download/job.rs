use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{error, info};

/// Request-scoped scratch directory.
///
/// `cleanup` removes it and logs the outcome. If the job is dropped without
/// `cleanup` (panic, cancelled request) the `TempDir` removes it on drop.
pub struct DownloadJob {
    dir: TempDir,
}

impl DownloadJob {
    pub fn new(parent: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("ytdl-").tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn cleanup(self) {
        let path = self.path().to_path_buf();
        info!("Cleaning up temporary directory: {}", path.display());
        if let Err(e) = self.dir.close() {
            error!("Error removing temporary directory {}: {}", path.display(), e);
        }
    }
}
