//! Runtime statistics

pub mod metrics;

pub use metrics::{BroadcastStats, TickStats};
