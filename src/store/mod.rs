//! Record store
//!
//! Owns the mapping from record key to record. All synchronization lives
//! inside [`RecordStore`]; callers share it behind an `Arc` and never lock
//! anything themselves.

pub mod error;
pub mod record;
pub mod records;

pub use error::StoreError;
pub use record::Record;
pub use records::{RecordStore, Records};
