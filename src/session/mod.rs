//! Authenticated HTTP session against a camera admin interface.
//!
//! # Features
//!
//! - Cookie jar owned by the HTTP client; login responses set the session
//! - Snapshot fetch with a per-attempt cache-busting timestamp
//! - Exactly one re-login and retry on 401, then a distinct
//!   authentication failure
//! - Transport errors propagate immediately without retry
//!
//! # Example
//!
//! ```no_run
//! use camsnap_core::session::{Credentials, SessionClient, SessionConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::new("ubnt", "ubnt");
//! let mut session = SessionClient::new(SessionConfig::new("http://camera.local/", creds))?;
//! session.authenticate().await?;
//! let jpeg = session.fetch().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod constants;
mod error;

pub use client::SessionClient;
pub use config::{Credentials, SessionConfig};
pub use constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_FETCH_ATTEMPTS};
pub use error::SessionError;
