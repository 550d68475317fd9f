//! Store error types

use thiserror::Error;

/// Error type for store operations
///
/// A lookup miss is not an error; `find` returns `None` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The record is malformed (empty key)
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// What was wrong with the record
        reason: String,
    },

    /// A record with this key is already stored
    #[error("record already exists: {0}")]
    DuplicateKey(String),
}

impl StoreError {
    /// Short stable label for logs and counters
    pub fn as_label(&self) -> &'static str {
        match self {
            StoreError::InvalidRecord { .. } => "invalid_record",
            StoreError::DuplicateKey(_) => "duplicate_key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StoreError::DuplicateKey("ada@test.com".into());
        assert_eq!(err.to_string(), "record already exists: ada@test.com");

        let err = StoreError::InvalidRecord {
            reason: "empty key".into(),
        };
        assert_eq!(err.to_string(), "invalid record: empty key");
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            StoreError::DuplicateKey(String::new()).as_label(),
            "duplicate_key"
        );
        assert_eq!(
            StoreError::InvalidRecord {
                reason: String::new()
            }
            .as_label(),
            "invalid_record"
        );
    }
}
