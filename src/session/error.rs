//! Error types for the session module.
//!
//! Every variant carries the URL that failed so a single log line per tick
//! is enough to diagnose the camera without extra context.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the camera admin interface.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Network-level error (DNS resolution, connection refused, TLS, body read).
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Snapshot request returned a status other than 200 or 401.
    #[error("snapshot request to {url} failed: {status}")]
    HttpStatus {
        /// The snapshot URL, including the cache-buster.
        url: String,
        /// The HTTP status returned by the camera.
        status: StatusCode,
    },

    /// Login request returned a status other than 200.
    #[error("login to {url} rejected: {status}")]
    Login {
        /// The login URL.
        url: String,
        /// The HTTP status returned by the camera.
        status: StatusCode,
    },

    /// Snapshot request was still unauthorized after a successful re-login.
    #[error("authentication failure: {url} still unauthorized after re-authenticating")]
    AuthenticationFailure {
        /// The snapshot URL of the last attempt.
        url: String,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl SessionError {
    /// Maps a transport error, promoting timeouts to [`SessionError::Timeout`].
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a snapshot status error.
    pub fn http_status(url: impl Into<String>, status: StatusCode) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a login rejection error.
    pub fn login(url: impl Into<String>, status: StatusCode) -> Self {
        Self::Login {
            url: url.into(),
            status,
        }
    }

    /// Creates the repeated-401 error.
    pub fn authentication_failure(url: impl Into<String>) -> Self {
        Self::AuthenticationFailure { url: url.into() }
    }

    /// Creates an invalid base URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by rejected credentials or an expired
    /// session that re-login could not repair.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::AuthenticationFailure { .. })
    }
}

// No `From<reqwest::Error>`: every variant needs the URL, which the source
// error may not carry.
