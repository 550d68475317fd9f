//! Tick coordination
//!
//! Each tick runs the same sequence:
//!
//! ```text
//! candidate ──► RecordStore::create ──┬─ Ok  ──► Broadcaster::publish ──► Published
//!                                     └─ Err ──► log, skip publish    ──► Rejected
//! ```
//!
//! There is no retry; a rejected tick is simply reported.

pub mod outcome;
pub mod service;

pub use outcome::TickOutcome;
pub use service::Coordinator;
