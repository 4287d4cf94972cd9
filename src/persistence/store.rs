//! String key-value stores.

use std::collections::BTreeMap;

use crate::error::StorageError;

/// A string-to-string store in the shape of browser `localStorage` and
/// `sessionStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str);

    fn keys(&self) -> Vec<String>;

    /// Total size in bytes, counted as key length plus value length.
    fn size(&self) -> usize {
        self.keys()
            .iter()
            .map(|key| key.len() + self.get(key).map_or(0, |v| v.len()))
            .sum()
    }
}

/// An in-memory [`KeyValueStore`] with an optional byte quota.
///
/// ```
/// use card_styler::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::with_quota(16);
/// store.set("a", "1234").unwrap();
/// assert!(store.set("b", "way too long for the quota").is_err());
/// assert_eq!(store.size(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once `key + value` bytes across
    /// all entries would exceed `quota`.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let others = self.size() - replaced;
            let needed = key.len() + value.len();
            if others + needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available: quota.saturating_sub(others),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn size(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}
