//! Producer configuration

use std::time::Duration;

/// Shortest tick interval; shorter values are raised to this
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Producer configuration options
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Time between ticks
    pub interval: Duration,

    /// Stop after this many ticks (None = run until shut down)
    pub max_ticks: Option<u64>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_ticks: None,
        }
    }
}

impl ProducerConfig {
    /// Set the tick interval
    ///
    /// A zero interval is raised to one millisecond.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    /// Stop after `n` ticks
    pub fn max_ticks(mut self, n: u64) -> Self {
        self.max_ticks = Some(n);
        self
    }
}
