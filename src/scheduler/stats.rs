use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for a running scheduler.
///
/// Uses atomic counters so a clone of the `Arc` can be read while the
/// polling loop is running. `dispatched` counts persistence tasks spawned,
/// not writes completed.
#[derive(Debug, Default)]
pub struct SchedulerStats {
    ticks: AtomicUsize,
    fetch_failures: AtomicUsize,
    dispatched: AtomicUsize,
}

impl SchedulerStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of timer ticks handled.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Returns the number of ticks whose fetch failed.
    #[must_use]
    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::SeqCst)
    }

    /// Returns the number of captures handed to the sink.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub(super) fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    pub(super) fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::SeqCst);
    }

    pub(super) fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = SchedulerStats::new();
        assert_eq!(stats.ticks(), 0);
        assert_eq!(stats.fetch_failures(), 0);
        assert_eq!(stats.dispatched(), 0);
    }

    #[test]
    fn test_stats_count_independently() {
        let stats = SchedulerStats::new();
        stats.record_tick();
        stats.record_tick();
        stats.record_fetch_failure();
        stats.record_dispatch();
        assert_eq!(stats.ticks(), 2);
        assert_eq!(stats.fetch_failures(), 1);
        assert_eq!(stats.dispatched(), 1);
    }
}
