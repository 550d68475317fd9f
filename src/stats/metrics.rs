//! Statistics for the broadcaster and the tick coordinator

use std::sync::atomic::{AtomicU64, Ordering};

/// Broadcaster-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    /// Publish calls
    pub published: u64,
    /// Records enqueued across all subscribers
    pub delivered: u64,
    /// Records dropped because a subscriber queue was full
    pub dropped: u64,
    /// Subscribers currently registered
    pub active_subscribers: u64,
}

impl BroadcastStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of attempted deliveries that were dropped
    pub fn drop_ratio(&self) -> f64 {
        let attempts = self.delivered + self.dropped;
        if attempts > 0 {
            self.dropped as f64 / attempts as f64
        } else {
            0.0
        }
    }
}

/// Coordinator statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks handled
    pub ticks: u64,
    /// Records stored and published
    pub published: u64,
    /// Records rejected by the store
    pub rejected: u64,
}

impl TickStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Monotonic counter shared between threads
#[derive(Debug, Default)]
pub(crate) struct Counter(AtomicU64);

impl Counter {
    pub(crate) fn add(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn incr(&self) {
        self.add(1);
    }

    pub(crate) fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_stats_new() {
        let stats = BroadcastStats::new();
        assert_eq!(stats.published, 0);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.dropped, 0);
        assert_eq!(stats.active_subscribers, 0);
    }

    #[test]
    fn test_drop_ratio() {
        let stats = BroadcastStats {
            published: 4,
            delivered: 6,
            dropped: 2,
            active_subscribers: 2,
        };
        assert!((stats.drop_ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drop_ratio_no_attempts() {
        assert_eq!(BroadcastStats::new().drop_ratio(), 0.0);
    }

    #[test]
    fn test_tick_stats_new() {
        let stats = TickStats::new();
        assert_eq!(stats.ticks, 0);
        assert_eq!(stats.published, 0);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn test_counter() {
        let counter = Counter::default();
        counter.incr();
        counter.add(4);
        assert_eq!(counter.get(), 5);
    }
}
