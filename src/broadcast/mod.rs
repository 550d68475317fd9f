//! Multicast fan-out of records to subscribers
//!
//! Every subscriber owns a bounded queue. Publishing hands the record to each
//! queue with a non-blocking send; a full queue drops the record for that
//! subscriber alone.
//!
//! # Architecture
//!
//! ```text
//!                       Broadcaster
//!              ┌──────────────────────────┐
//!              │ subscribers: HashMap<Id, │
//!              │   Slot { tx, dropped }   │
//!              │ >                        │
//!              └────────────┬─────────────┘
//!                           │ publish(record)
//!          ┌────────────────┼────────────────┐
//!          ▼                ▼                ▼
//!     [queue 1]        [queue 2]        [queue N]      (capacity B each)
//!          │                │                │
//!          ▼                ▼                ▼
//!   Subscription 1   Subscription 2   Subscription N
//!    recv()/next()    recv()/next()    recv()/next()
//! ```
//!
//! # Rules
//!
//! - Per-subscriber FIFO; no ordering across subscribers
//! - No replay: a subscriber only sees records published after it subscribed
//! - Overflow drops the newest record for that subscriber and reports
//!   [`Delivery::Dropped`]; the publisher never sees an error
//! - A dropped subscription is pruned no later than the next publish
//!
//! Records travel as `Arc<Record>`, so every queue shares one allocation.

pub mod broadcaster;
pub mod config;
pub mod delivery;
pub mod subscription;

pub use broadcaster::Broadcaster;
pub use config::{BroadcastConfig, DEFAULT_SUBSCRIBER_CAPACITY};
pub use delivery::{Delivery, PublishReport, SubscriberId};
pub use subscription::Subscription;
