//! Snapshot payloads and their persistence.
//!
//! A [`Capture`] is produced once per successful fetch and handed, by value,
//! to a [`CaptureSink`]. The default sink, [`FileStore`], writes each capture
//! to a path derived from its timestamp:
//!
//! ```text
//! <base>/<YYYY>/<MM>/<DD>/<HH>/<YYYY>-<MM>-<DD>-<HH>-<mm>-<ss>.jpg
//! ```

mod error;
mod path;
mod store;

use chrono::{DateTime, Local};

pub use error::PersistError;
pub use path::{SNAPSHOT_LAYOUT, snapshot_path};
pub use store::{CaptureSink, FileStore};

/// One snapshot: the JPEG bytes and the wall-clock time of the tick that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    taken_at: DateTime<Local>,
    bytes: Vec<u8>,
}

impl Capture {
    /// Creates a capture from a tick timestamp and the fetched payload.
    #[must_use]
    pub fn new(taken_at: DateTime<Local>, bytes: Vec<u8>) -> Self {
        Self { taken_at, bytes }
    }

    /// Returns the tick timestamp.
    #[must_use]
    pub fn taken_at(&self) -> DateTime<Local> {
        self.taken_at
    }

    /// Returns the payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the camera sent an empty body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the capture, returning the payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
