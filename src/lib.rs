//! Camsnap Core Library
//!
//! This library provides the core functionality for the camsnap tool, which
//! periodically captures still snapshots from a camera's HTTP admin interface
//! and archives them under a timestamp-derived directory tree.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`session`] - Cookie-authenticated HTTP session with bounded re-login retry
//! - [`capture`] - Snapshot payloads, storage path layout and filesystem persistence
//! - [`scheduler`] - Fixed-cadence polling loop with fire-and-forget persistence

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod scheduler;
pub mod session;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use capture::{Capture, CaptureSink, FileStore, PersistError, SNAPSHOT_LAYOUT, snapshot_path};
pub use scheduler::{DEFAULT_INTERVAL, Scheduler, SchedulerError, SchedulerStats, TickOutcome};
pub use session::{
    Credentials, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_FETCH_ATTEMPTS,
    SessionClient, SessionConfig, SessionError,
};
