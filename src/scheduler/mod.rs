//! Fixed-cadence snapshot polling with fire-and-forget persistence.
//!
//! This module provides the [`Scheduler`], which drives a [`SessionClient`]
//! on a timer and hands every successful snapshot to a [`CaptureSink`].
//!
//! # Concurrency Model
//!
//! - One driver loop runs ticks strictly sequentially; a tick's fetch (and
//!   any re-login) completes before the next tick's fetch begins
//! - The scheduler owns the session, so the cookie jar is never touched by
//!   two ticks at once
//! - Ticks that fall due during a slow fetch are skipped, not queued
//! - Each capture is persisted in its own Tokio task: no join, no bound on
//!   in-flight writes, no ordering between them
//! - Stopping the loop does not wait for in-flight writes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use camsnap_core::{Credentials, FileStore, Scheduler, SessionClient, SessionConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SessionClient::new(SessionConfig::new(
//!     "http://camera.local/",
//!     Credentials::new("ubnt", "ubnt"),
//! ))?;
//! let store = Arc::new(FileStore::new("/srv/camera"));
//! let mut scheduler = Scheduler::new(session, store, Duration::from_secs(5))?;
//! scheduler.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await;
//! # Ok(())
//! # }
//! ```

mod stats;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, instrument, warn};

use crate::capture::{Capture, CaptureSink};
use crate::session::SessionClient;

pub use stats::SchedulerStats;

/// Default polling interval (5 seconds).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Error type for scheduler construction.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The polling interval must be non-zero.
    #[error("invalid polling interval {interval:?}: must be greater than zero")]
    InvalidInterval {
        /// The rejected interval.
        interval: Duration,
    },
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A capture was handed to the sink.
    Dispatched,
    /// The fetch failed; the error was logged.
    FetchFailed,
}

/// Polls one camera session on a fixed interval.
pub struct Scheduler {
    session: SessionClient,
    sink: Arc<dyn CaptureSink>,
    interval: Duration,
    stats: Arc<SchedulerStats>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("session", &self.session)
            .field("interval", &self.interval)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Creates a scheduler that takes exclusive ownership of `session`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidInterval`] if `interval` is zero.
    #[instrument(level = "debug", skip(session, sink))]
    pub fn new(
        session: SessionClient,
        sink: Arc<dyn CaptureSink>,
        interval: Duration,
    ) -> Result<Self, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval { interval });
        }

        Ok(Self {
            session,
            sink,
            interval,
            stats: Arc::new(SchedulerStats::new()),
        })
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns a handle to the live counters.
    #[must_use]
    pub fn stats(&self) -> Arc<SchedulerStats> {
        Arc::clone(&self.stats)
    }

    /// Polls forever. The process is expected to be killed externally.
    pub async fn run(&mut self) {
        self.run_until(std::future::pending::<()>()).await;
    }

    /// Polls until `shutdown` completes.
    ///
    /// The first tick fires one interval after the call. A shutdown that
    /// resolves mid-fetch takes effect once that tick finishes; persistence
    /// tasks already spawned keep running in the background.
    #[instrument(skip(self, shutdown), fields(interval_ms = self.interval.as_millis()))]
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!("snapshot polling started");
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }

        info!(
            ticks = self.stats.ticks(),
            fetch_failures = self.stats.fetch_failures(),
            dispatched = self.stats.dispatched(),
            "snapshot polling stopped"
        );
    }

    /// Runs a single tick: stamp, fetch, then dispatch or log.
    pub async fn poll_once(&mut self) -> TickOutcome {
        let taken_at = Local::now();
        self.stats.record_tick();
        debug!(taken_at = %taken_at, "tick");

        match self.session.fetch().await {
            Ok(bytes) => {
                self.dispatch(Capture::new(taken_at, bytes));
                TickOutcome::Dispatched
            }
            Err(e) => {
                self.stats.record_fetch_failure();
                if e.is_auth_error() {
                    error!(error = %e, "snapshot fetch failed: check camera credentials");
                } else {
                    warn!(error = %e, "snapshot fetch failed");
                }
                TickOutcome::FetchFailed
            }
        }
    }

    /// Spawns an independent persistence task; never awaited.
    fn dispatch(&self, capture: Capture) {
        let sink = Arc::clone(&self.sink);
        let taken_at = capture.taken_at();
        let bytes = capture.len();
        self.stats.record_dispatch();
        debug!(taken_at = %taken_at, bytes, "dispatching capture");

        tokio::spawn(async move {
            match sink.persist(capture).await {
                Ok(path) => info!(path = %path.display(), bytes, "snapshot saved"),
                Err(e) => warn!(taken_at = %taken_at, error = %e, "snapshot write failed"),
            }
        });
    }
}
