//! Per-subscriber delivery outcomes

use std::fmt;

/// Identifier of one subscription
///
/// Allocated from a per-broadcaster counter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub(crate) u64);

impl SubscriberId {
    /// Raw numeric value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Result of handing one record to one subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Record enqueued
    Delivered,
    /// Queue was full; record skipped for this subscriber only
    Dropped,
    /// Subscriber went away; it has been removed
    Disconnected,
}

/// Outcome of a single publish across all subscribers
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    outcomes: Vec<(SubscriberId, Delivery)>,
}

impl PublishReport {
    pub(crate) fn push(&mut self, id: SubscriberId, delivery: Delivery) {
        self.outcomes.push((id, delivery));
    }

    /// Outcome for a given subscriber, if it was registered at publish time
    pub fn outcome(&self, id: SubscriberId) -> Option<Delivery> {
        self.outcomes
            .iter()
            .find(|(sub, _)| *sub == id)
            .map(|(_, delivery)| *delivery)
    }

    /// All outcomes, in no particular order
    pub fn outcomes(&self) -> &[(SubscriberId, Delivery)] {
        &self.outcomes
    }

    /// Number of subscribers the record was enqueued for
    pub fn delivered(&self) -> usize {
        self.count(Delivery::Delivered)
    }

    /// Number of subscribers the record was dropped for
    pub fn dropped(&self) -> usize {
        self.count(Delivery::Dropped)
    }

    /// Number of subscribers found gone and removed
    pub fn disconnected(&self) -> usize {
        self.count(Delivery::Disconnected)
    }

    /// True if no subscriber was registered
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, kind: Delivery) -> usize {
        self.outcomes.iter().filter(|(_, d)| *d == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = PublishReport::default();
        assert!(report.is_empty());

        report.push(SubscriberId(1), Delivery::Delivered);
        report.push(SubscriberId(2), Delivery::Dropped);
        report.push(SubscriberId(3), Delivery::Delivered);
        report.push(SubscriberId(4), Delivery::Disconnected);

        assert_eq!(report.delivered(), 2);
        assert_eq!(report.dropped(), 1);
        assert_eq!(report.disconnected(), 1);
        assert_eq!(report.outcome(SubscriberId(2)), Some(Delivery::Dropped));
        assert_eq!(report.outcome(SubscriberId(9)), None);
    }

    #[test]
    fn test_subscriber_id_display() {
        assert_eq!(SubscriberId(7).to_string(), "sub-7");
    }
}
