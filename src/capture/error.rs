//! Error types for snapshot persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing a capture to disk.
///
/// These are logged by the persistence task and never reach the polling loop.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The hourly directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file could not be written.
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        /// The snapshot file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns the path the failed operation targeted.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}
