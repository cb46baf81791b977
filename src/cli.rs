//! CLI argument definitions using clap derive macros.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use camsnap_core::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Periodically capture camera snapshots into a dated directory tree.
///
/// Camsnap logs into a camera's admin interface, fetches `snap.jpeg` on a
/// fixed interval and stores each frame as
/// `<path>/YYYY/MM/DD/HH/YYYY-MM-DD-HH-mm-ss.jpg`.
#[derive(Parser)]
#[command(name = "camsnap")]
#[command(author, version, about)]
pub struct Args {
    /// Snapshot interval (e.g. 5s, 1m30s, 500ms)
    #[arg(short, long, env = "CAMSNAP_INTERVAL", default_value = "5s", value_parser = parse_interval)]
    pub interval: Duration,

    /// Camera admin interface user name
    #[arg(long, env = "CAMSNAP_USER", value_parser = non_empty)]
    pub user: String,

    /// Camera admin interface password
    #[arg(long, env = "CAMSNAP_PASS", hide_env_values = true, value_parser = non_empty)]
    pub pass: String,

    /// Base path in which to store snapshots
    #[arg(long, env = "CAMSNAP_PATH", value_parser = non_empty_path)]
    pub path: PathBuf,

    /// Camera admin interface URL (e.g. https://192.168.1.20/)
    #[arg(long, env = "CAMSNAP_URL", value_parser = trimmed_non_empty)]
    pub url: String,

    /// HTTP connect timeout in seconds (1-300)
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// Total HTTP request timeout in seconds (1-3600)
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub request_timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("interval", &self.interval)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("path", &self.path)
            .field("url", &self.url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .finish()
    }
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if interval.is_zero() {
        return Err("interval must be greater than zero".to_string());
    }
    Ok(interval)
}

/// Rejects blank input but keeps the value byte-for-byte; credentials may
/// legitimately carry surrounding spaces.
fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(value.to_string())
}

fn trimmed_non_empty(value: &str) -> Result<String, String> {
    non_empty(value.trim())
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    trimmed_non_empty(value).map(PathBuf::from)
}
