//! Constants for the session module (endpoints, timeouts, retry cap).

/// Default HTTP connect timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout (30 seconds; snapshots are small).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Hard cap on snapshot GETs per `fetch()` call: the first attempt plus one
/// retry after re-authentication.
pub const MAX_FETCH_ATTEMPTS: u32 = 2;

/// Snapshot endpoint, relative to the base URL.
pub(crate) const SNAPSHOT_ENDPOINT: &str = "snap.jpeg";

/// Login endpoint, relative to the base URL.
pub(crate) const LOGIN_ENDPOINT: &str = "api/1.0/login";

/// Cache-busting query parameter carrying the unix timestamp.
pub(crate) const CACHE_BUSTER_PARAM: &str = "cb";
