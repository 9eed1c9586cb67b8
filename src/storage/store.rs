//! Key-value store abstraction
//!
//! The minimal contract an external ledger store has to satisfy: point
//! reads, point writes and a query over one top-level field of the stored
//! JSON documents.

use std::collections::BTreeMap;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// A key-value store holding JSON documents
pub trait KeyValueStore: Send {
    /// Read the value under `key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous value
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// All values whose document has `field` equal to the string `value`
    fn query_by_field(&self, field: &str, value: &str) -> Result<Vec<Vec<u8>>, StoreError>;
}

/// In-process store, ordered by key
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys starting with `prefix`, in order
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn query_by_field(&self, field: &str, value: &str) -> Result<Vec<Vec<u8>>, StoreError> {
        let mut matches = Vec::new();

        for (key, bytes) in &self.entries {
            // Non-JSON values are never matched by a field query
            let doc: serde_json::Value = match serde_json::from_slice(bytes) {
                Ok(doc) => doc,
                Err(_) => {
                    log::debug!("Skipping non-JSON value at {}", key);
                    continue;
                }
            };

            if doc.get(field).and_then(|v| v.as_str()) == Some(value) {
                matches.push(bytes.clone());
            }
        }

        Ok(matches)
    }
}
