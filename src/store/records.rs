//! Record store implementation
//!
//! Keyed collection of records shared between the producer path and the
//! query path.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::StoreError;
use super::record::Record;

/// Concurrency-safe keyed record collection
///
/// Thread-safe via `RwLock`. `create` holds the write lock for the whole
/// check-and-insert, so existence checks and inserts are mutually exclusive
/// while lookups and listings share the read lock.
pub struct RecordStore {
    records: RwLock<HashMap<String, Arc<Record>>>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a new record
    ///
    /// Fails with [`StoreError::InvalidRecord`] if the key is blank and with
    /// [`StoreError::DuplicateKey`] if the key is already taken. On a duplicate
    /// the stored record is left untouched.
    pub async fn create(&self, record: Record) -> Result<Arc<Record>, StoreError> {
        if !record.has_valid_key() {
            return Err(StoreError::InvalidRecord {
                reason: "key must not be blank".into(),
            });
        }

        let mut records = self.records.write().await;

        match records.entry(record.key().to_owned()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                let record = Arc::new(record);
                entry.insert(Arc::clone(&record));

                tracing::debug!(key = %record.key(), total = records.len(), "Record stored");

                Ok(record)
            }
        }
    }

    /// Check if a record with this key exists
    pub async fn exists(&self, key: &str) -> bool {
        self.records.read().await.contains_key(key)
    }

    /// Look up a record by key
    pub async fn find(&self, key: &str) -> Option<Arc<Record>> {
        self.records.read().await.get(key).cloned()
    }

    /// Snapshot of all stored records, in no particular order
    ///
    /// Records inserted after the snapshot is taken are not included.
    pub async fn list(&self) -> Records {
        let records = self.records.read().await;
        Records {
            inner: records.values().cloned().collect::<Vec<_>>().into_iter(),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot iterator over a store snapshot
#[derive(Debug)]
pub struct Records {
    inner: std::vec::IntoIter<Arc<Record>>,
}

impl Iterator for Records {
    type Item = Arc<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Records {}
