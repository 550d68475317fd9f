//! Tick outcomes

use std::sync::Arc;

use crate::broadcast::PublishReport;
use crate::store::{Record, StoreError};

/// Result of one producer tick
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// Record stored and handed to the broadcaster
    Published {
        /// The stored record
        record: Arc<Record>,
        /// Per-subscriber delivery results
        report: PublishReport,
    },
    /// Store refused the record; nothing was published
    Rejected(StoreError),
}

impl TickOutcome {
    /// True if the record was stored and published
    pub fn is_published(&self) -> bool {
        matches!(self, TickOutcome::Published { .. })
    }

    /// The rejection reason, if any
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            TickOutcome::Rejected(err) => Some(err),
            TickOutcome::Published { .. } => None,
        }
    }

    /// Convert into a `Result`, dropping the stored record
    pub fn into_result(self) -> Result<PublishReport, StoreError> {
        match self {
            TickOutcome::Published { report, .. } => Ok(report),
            TickOutcome::Rejected(err) => Err(err),
        }
    }
}
