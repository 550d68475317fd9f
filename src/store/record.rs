//! Record type
//!
//! A record is an immutable key/secret pair. Records are handed around as
//! `Arc<Record>` so the store and every subscriber queue share one allocation.

use std::fmt;

/// One unit of distributed state
///
/// Fields are private; once built a record cannot change.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    secret: String,
}

impl Record {
    /// Create a new record
    ///
    /// No validation happens here; the store rejects empty keys on insert.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Unique identifier (e.g. an email address)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Opaque payload (e.g. a password hash)
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether the key is usable as a store key
    pub fn has_valid_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let record = Record::new("ada@test.com", "5f4dcc3b");
        assert_eq!(record.key(), "ada@test.com");
        assert_eq!(record.secret(), "5f4dcc3b");
        assert!(record.has_valid_key());
    }

    #[test]
    fn test_blank_keys_are_invalid() {
        assert!(!Record::new("", "x").has_valid_key());
        assert!(!Record::new("   ", "x").has_valid_key());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let record = Record::new("ada@test.com", "hunter2");
        let rendered = format!("{:?}", record);

        assert!(rendered.contains("ada@test.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
