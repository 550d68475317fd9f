//! # recordcast
//!
//! In-process record store with bounded multicast fan-out.
//!
//! A periodic producer creates records, a concurrency-safe store indexes them,
//! and a broadcaster delivers each new record to every current subscriber.
//! Slow subscribers lose records instead of slowing anyone else down.
//!
//! # Architecture
//!
//! ```text
//!   Producer (interval tick)
//!        │ RecordSource::next_record()
//!        ▼
//!   Coordinator::tick ──► RecordStore::create ──► Err ──► logged, skipped
//!        │                        │
//!        │                        └─ Ok(Arc<Record>)
//!        ▼
//!   Broadcaster::publish ──┬──► [queue 1] ──► Subscription 1
//!                          ├──► [queue 2] ──► Subscription 2
//!                          └──► [queue N] ──► Subscription N
//!
//!   Queries: record_exists / find_record / list_records / current
//!            go straight to the RecordStore
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use recordcast::{Coordinator, Producer, ProducerConfig, Record};
//!
//! #[tokio::main]
//! async fn main() {
//!     let coordinator = Arc::new(Coordinator::default());
//!     let mut feed = coordinator.subscribe().await;
//!
//!     let mut n = 0;
//!     let producer = Producer::new(
//!         Arc::clone(&coordinator),
//!         ProducerConfig::default().interval(Duration::from_secs(1)),
//!     );
//!     let _handle = producer.spawn(move || {
//!         n += 1;
//!         Record::new(format!("user{}@test.com", n), "5f4dcc3b5aa765d6")
//!     });
//!
//!     while let Some(record) = feed.recv().await {
//!         println!("new record: {}", record.key());
//!     }
//! }
//! ```

pub mod broadcast;
pub mod coordinator;
pub mod producer;
pub mod stats;
pub mod store;

pub use broadcast::{
    BroadcastConfig, Broadcaster, Delivery, PublishReport, SubscriberId, Subscription,
};
pub use coordinator::{Coordinator, TickOutcome};
pub use producer::{Producer, ProducerConfig, RecordSource};
pub use stats::{BroadcastStats, TickStats};
pub use store::{Record, RecordStore, Records, StoreError};
