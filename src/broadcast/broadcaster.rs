//! Broadcaster implementation
//!
//! Fans each published record out to every registered subscriber through a
//! dedicated bounded queue per subscriber.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, RwLock};

use crate::stats::metrics::Counter;
use crate::stats::BroadcastStats;
use crate::store::Record;

use super::config::BroadcastConfig;
use super::delivery::{Delivery, PublishReport, SubscriberId};
use super::subscription::Subscription;

/// Sending side of one subscriber queue
pub(super) struct SubscriberSlot {
    tx: mpsc::Sender<Arc<Record>>,
    dropped: Arc<AtomicU64>,
}

/// State reachable from subscriptions
///
/// Subscriptions only hold a `Weak` to this, so dropping the broadcaster
/// drops every sender and ends all streams.
pub(super) struct Shared {
    pub(super) subscribers: RwLock<HashMap<SubscriberId, SubscriberSlot>>,
}

/// Multicast channel with per-subscriber bounded buffering
///
/// `publish` never waits on a subscriber: each delivery is a single
/// `try_send`, and a full queue drops the record for that subscriber only.
pub struct Broadcaster {
    shared: Arc<Shared>,
    config: BroadcastConfig,
    next_id: AtomicU64,
    closed: AtomicBool,
    published: Counter,
    delivered: Counter,
    dropped: Counter,
}

impl Broadcaster {
    /// Create a broadcaster with default configuration
    pub fn new() -> Self {
        Self::with_config(BroadcastConfig::default())
    }

    /// Create a broadcaster with custom configuration
    pub fn with_config(config: BroadcastConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                subscribers: RwLock::new(HashMap::new()),
            }),
            config,
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            published: Counter::default(),
            delivered: Counter::default(),
            dropped: Counter::default(),
        }
    }

    /// Get the broadcaster configuration
    pub fn config(&self) -> &BroadcastConfig {
        &self.config
    }

    /// Register a new subscriber
    ///
    /// The subscriber only sees records published after this call returns.
    /// After [`close`](Self::close) the returned stream ends immediately.
    pub async fn subscribe(&self) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let capacity = self.config.subscriber_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        let dropped = Arc::new(AtomicU64::new(0));

        let mut subscribers = self.shared.subscribers.write().await;

        // Checked under the lock so close() cannot miss this subscriber
        if self.closed.load(Ordering::Acquire) {
            drop(tx);
        } else {
            subscribers.insert(
                id,
                SubscriberSlot {
                    tx,
                    dropped: Arc::clone(&dropped),
                },
            );

            tracing::info!(
                subscriber = %id,
                capacity = capacity,
                subscribers = subscribers.len(),
                "Subscriber added"
            );
        }
        drop(subscribers);

        Subscription::new(id, rx, dropped, Arc::downgrade(&self.shared))
    }

    /// Remove a subscriber and release its queue
    ///
    /// Returns false if it was already gone (e.g. after `close`).
    pub async fn unsubscribe(&self, subscription: Subscription) -> bool {
        let id = subscription.id();
        let removed = self.shared.subscribers.write().await.remove(&id).is_some();

        if removed {
            tracing::info!(subscriber = %id, "Subscriber removed");
        }

        removed
    }

    /// Deliver a record to every registered subscriber
    ///
    /// Never fails and never waits on a subscriber queue. Full queues yield
    /// [`Delivery::Dropped`]; subscribers whose stream is gone yield
    /// [`Delivery::Disconnected`] and are pruned before this returns.
    pub async fn publish(&self, record: impl Into<Arc<Record>>) -> PublishReport {
        let record = record.into();
        let mut report = PublishReport::default();
        let mut disconnected = Vec::new();

        {
            let subscribers = self.shared.subscribers.read().await;

            for (id, slot) in subscribers.iter() {
                let delivery = match slot.tx.try_send(Arc::clone(&record)) {
                    Ok(()) => Delivery::Delivered,
                    Err(TrySendError::Full(_)) => {
                        let total = slot.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                        tracing::warn!(
                            subscriber = %id,
                            key = %record.key(),
                            dropped = total,
                            "Delivery dropped: subscriber queue full"
                        );
                        Delivery::Dropped
                    }
                    Err(TrySendError::Closed(_)) => {
                        disconnected.push(*id);
                        Delivery::Disconnected
                    }
                };
                report.push(*id, delivery);
            }
        }

        if !disconnected.is_empty() {
            let mut subscribers = self.shared.subscribers.write().await;
            for id in disconnected {
                subscribers.remove(&id);
                tracing::debug!(subscriber = %id, "Pruned disconnected subscriber");
            }
        }

        self.published.incr();
        self.delivered.add(report.delivered() as u64);
        self.dropped.add(report.dropped() as u64);

        report
    }

    /// Shut down fan-out
    ///
    /// Every open subscription ends after draining what it already holds.
    pub async fn close(&self) {
        let mut subscribers = self.shared.subscribers.write().await;
        self.closed.store(true, Ordering::Release);
        let count = subscribers.len();
        subscribers.clear();

        tracing::info!(subscribers = count, "Broadcaster closed");
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of registered subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.shared.subscribers.read().await.len()
    }

    /// Snapshot of broadcaster counters
    pub async fn stats(&self) -> BroadcastStats {
        BroadcastStats {
            published: self.published.get(),
            delivered: self.delivered.get(),
            dropped: self.dropped.get(),
            active_subscribers: self.subscriber_count().await as u64,
        }
    }
}

#[cfg(test)]
impl Broadcaster {
    /// Hold the registry write lock so publishes stall until it is dropped
    pub(crate) async fn hold_registry(&self) -> impl Sized + '_ {
        self.shared.subscribers.write().await
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
