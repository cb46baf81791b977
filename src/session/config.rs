//! Validated startup configuration consumed by [`SessionClient`](super::SessionClient).

use std::fmt;
use std::time::Duration;

use super::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Camera login credentials, fixed for the process lifetime.
///
/// The `Debug` rendering redacts the password so the value can appear in
/// structured log fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a user name and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for one camera session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Camera admin interface base URL. A missing trailing `/` is added.
    pub base_url: String,
    /// Login credentials.
    pub credentials: Credentials,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Total per-request timeout, including body transfer.
    pub request_timeout: Duration,
}

impl SessionConfig {
    /// Creates a configuration with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Overrides the connect and request timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, connect_timeout: Duration, request_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.request_timeout = request_timeout;
        self
    }
}
