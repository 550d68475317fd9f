//! Subscriber side of the broadcaster
//!
//! A [`Subscription`] owns the receiving half of one bounded queue. It yields
//! records in publish order and ends once the broadcaster is closed or dropped
//! and the queue has been drained.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::store::Record;

use super::broadcaster::Shared;
use super::delivery::SubscriberId;

/// Consumer-owned stream of published records
///
/// Dropping the subscription unregisters it. If the registry is busy at that
/// moment the broadcaster notices the closed queue on its next publish and
/// removes it then.
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::Receiver<Arc<Record>>,
    dropped: Arc<AtomicU64>,
    shared: Weak<Shared>,
}

impl Subscription {
    pub(super) fn new(
        id: SubscriberId,
        rx: mpsc::Receiver<Arc<Record>>,
        dropped: Arc<AtomicU64>,
        shared: Weak<Shared>,
    ) -> Self {
        Self {
            id,
            rx,
            dropped,
            shared,
        }
    }

    /// Identifier of this subscription
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next record
    ///
    /// Returns `None` once the broadcaster has shut down and nothing is left
    /// in the queue.
    pub async fn recv(&mut self) -> Option<Arc<Record>> {
        self.rx.recv().await
    }

    /// Take the next record if one is already queued
    pub fn try_recv(&mut self) -> Option<Arc<Record>> {
        self.rx.try_recv().ok()
    }

    /// Number of records dropped for this subscriber because its queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of records waiting in the queue
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Stream for Subscription {
    type Item = Arc<Record>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            // Non-blocking: on contention the next publish prunes the closed queue
            if let Ok(mut subscribers) = shared.subscribers.try_write() {
                if subscribers.remove(&self.id).is_some() {
                    tracing::debug!(subscriber = %self.id, "Subscriber dropped");
                }
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pending", &self.rx.len())
            .field("dropped", &self.dropped())
            .finish()
    }
}
