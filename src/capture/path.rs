//! Timestamp-derived snapshot path layout.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

/// `strftime` layout of a snapshot path relative to the storage base.
///
/// One directory per hour; every field zero-padded, 24-hour clock.
pub const SNAPSHOT_LAYOUT: &str = "%Y/%m/%d/%H/%Y-%m-%d-%H-%M-%S.jpg";

/// Derives the storage path for a snapshot taken at `taken_at`.
///
/// The layout is split on `/` and joined component by component, so the
/// result uses the platform separator.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use chrono::{TimeZone, Utc};
/// use camsnap_core::snapshot_path;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
/// let path = snapshot_path(Path::new("/srv/cam"), &at);
/// assert_eq!(path, Path::new("/srv/cam/2024/03/07/09/2024-03-07-09-05-02.jpg"));
/// ```
#[must_use]
pub fn snapshot_path<Tz>(base: &Path, taken_at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    taken_at
        .format(SNAPSHOT_LAYOUT)
        .to_string()
        .split('/')
        .fold(base.to_path_buf(), |path, component| path.join(component))
}
