//! Coordinator implementation
//!
//! Joins the store and the broadcaster: every accepted record is published,
//! every rejected one is reported and skipped.

use std::sync::Arc;

use futures::stream::{self, Stream};

use crate::broadcast::{Broadcaster, PublishReport, Subscription};
use crate::stats::metrics::Counter;
use crate::stats::TickStats;
use crate::store::{Record, RecordStore, Records, StoreError};

use super::outcome::TickOutcome;

/// Producer-tick handler and query facade
///
/// The store and the broadcaster never reference each other; this type is
/// the only place both are touched.
pub struct Coordinator {
    store: Arc<RecordStore>,
    broadcaster: Arc<Broadcaster>,
    ticks: Counter,
    published: Counter,
    rejected: Counter,
}

impl Coordinator {
    /// Create a coordinator over an existing store and broadcaster
    pub fn new(store: Arc<RecordStore>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            store,
            broadcaster,
            ticks: Counter::default(),
            published: Counter::default(),
            rejected: Counter::default(),
        }
    }

    /// Get the record store
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Get the broadcaster
    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    /// Handle one tick with an already built candidate
    ///
    /// Store first, publish only on success. Failures are logged and
    /// returned, never retried.
    pub async fn tick(&self, candidate: Record) -> TickOutcome {
        self.ticks.incr();
        let key = candidate.key().to_owned();

        match self.store.create(candidate).await {
            Ok(record) => {
                let report = self.broadcaster.publish(Arc::clone(&record)).await;
                self.published.incr();

                tracing::info!(
                    key = %record.key(),
                    delivered = report.delivered(),
                    dropped = report.dropped(),
                    "Record created"
                );

                TickOutcome::Published { record, report }
            }
            Err(err) => {
                self.rejected.incr();

                tracing::error!(
                    key = %key,
                    reason = err.as_label(),
                    error = %err,
                    "Record creation failed"
                );

                TickOutcome::Rejected(err)
            }
        }
    }

    /// Create a record from its parts and publish it
    pub async fn create_record(
        &self,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<PublishReport, StoreError> {
        self.tick(Record::new(key, secret)).await.into_result()
    }

    /// Check if a record exists
    pub async fn record_exists(&self, key: &str) -> bool {
        self.store.exists(key).await
    }

    /// Look up a record
    pub async fn find_record(&self, key: &str) -> Option<Arc<Record>> {
        self.store.find(key).await
    }

    /// Snapshot of all records
    pub async fn list_records(&self) -> Records {
        self.store.list().await
    }

    /// One-shot stream over the records stored right now
    ///
    /// Ends after the snapshot; use [`subscribe`](Self::subscribe) to follow
    /// new records.
    pub async fn current(&self) -> impl Stream<Item = Arc<Record>> {
        stream::iter(self.store.list().await)
    }

    /// Follow records created from now on
    pub async fn subscribe(&self) -> Subscription {
        self.broadcaster.subscribe().await
    }

    /// Stop following records
    pub async fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.broadcaster.unsubscribe(subscription).await
    }

    /// Snapshot of tick counters
    pub fn stats(&self) -> TickStats {
        TickStats {
            ticks: self.ticks.get(),
            published: self.published.get(),
            rejected: self.rejected.get(),
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(
            Arc::new(RecordStore::new()),
            Arc::new(Broadcaster::new()),
        )
    }
}
