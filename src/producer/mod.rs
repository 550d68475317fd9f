//! Periodic record producer
//!
//! Stands in for the external scheduler: a timer fires, a [`RecordSource`]
//! builds a candidate, and the [`Coordinator`](crate::Coordinator) stores
//! and publishes it.

pub mod config;
pub mod runner;
pub mod source;

pub use config::{ProducerConfig, MIN_INTERVAL};
pub use runner::Producer;
pub use source::RecordSource;
