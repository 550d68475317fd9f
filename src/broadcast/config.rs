//! Broadcaster configuration

/// Default per-subscriber queue capacity
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 256;

/// Broadcaster configuration options
///
/// The overflow policy is fixed: when a subscriber's queue is full the newest
/// record is dropped for that subscriber only.
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Capacity of each subscriber's queue (always >= 1)
    pub subscriber_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
        }
    }
}

impl BroadcastConfig {
    /// Set the per-subscriber queue capacity
    ///
    /// Values below 1 are raised to 1.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.subscriber_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BroadcastConfig::default();
        assert_eq!(config.subscriber_capacity, DEFAULT_SUBSCRIBER_CAPACITY);
    }

    #[test]
    fn test_builder_capacity() {
        let config = BroadcastConfig::default().capacity(8);
        assert_eq!(config.subscriber_capacity, 8);
    }

    #[test]
    fn test_builder_capacity_clamped() {
        let config = BroadcastConfig::default().capacity(0);
        assert_eq!(config.subscriber_capacity, 1);
    }
}
