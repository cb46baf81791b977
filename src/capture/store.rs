//! Persistence collaborator seam and the filesystem implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{DirBuilder, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use super::error::PersistError;
use super::path::snapshot_path;
use super::Capture;

/// Unix permission bits for created directories (owner only).
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Unix permission bits for snapshot files (owner read/write).
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Receives captures from the scheduler.
///
/// Each call runs in its own spawned task; implementations must tolerate
/// concurrent, unordered invocations.
#[async_trait]
pub trait CaptureSink: Send + Sync {
    /// Stores one capture, returning where it was written.
    async fn persist(&self, capture: Capture) -> Result<PathBuf, PersistError>;
}

/// Writes captures beneath a base directory using
/// [`SNAPSHOT_LAYOUT`](super::SNAPSHOT_LAYOUT).
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_path`. The directory need not exist.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the storage root.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path a capture will be written to.
    #[must_use]
    pub fn path_for(&self, capture: &Capture) -> PathBuf {
        snapshot_path(&self.base_path, &capture.taken_at())
    }
}

#[async_trait]
impl CaptureSink for FileStore {
    /// Creates missing parent directories, then writes (or truncates) the
    /// snapshot file.
    #[instrument(skip(self, capture), fields(taken_at = %capture.taken_at(), bytes = capture.len()))]
    async fn persist(&self, capture: Capture) -> Result<PathBuf, PersistError> {
        let path = self.path_for(&capture);

        if let Some(parent) = path.parent() {
            create_dir_all(parent)
                .await
                .map_err(|e| PersistError::create_dir(parent, e))?;
        }

        write_file(&path, capture.bytes())
            .await
            .map_err(|e| PersistError::write(&path, e))?;

        debug!(path = %path.display(), "snapshot written");
        Ok(path)
    }
}

async fn create_dir_all(dir: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(dir).await
}

async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(bytes).await?;
    file.flush().await
}
