//! In-memory state store.
//!
//! Provides a `BTreeMap`-based store that doesn't persist data. An optional
//! byte quota mimics the capacity limits of browser storage.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::{validate_key, StateStore};

/// In-memory store for tests and embedders without a durable medium.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored values (key -> value)
    values: RefCell<BTreeMap<String, String>>,
    /// Maximum total bytes across all values
    quota: Option<usize>,
    /// Number of successful writes
    writes: Cell<u64>,
}

impl MemoryStore {
    /// Create a new empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes pushing the total size past `max_bytes`.
    pub fn with_quota(max_bytes: usize) -> Self {
        Self {
            quota: Some(max_bytes),
            ..Self::default()
        }
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }

    /// Total bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.values
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Whether a value exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;

        if let Some(limit) = self.quota {
            let replaced = self
                .values
                .borrow()
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let requested = self.used_bytes() - replaced + key.len() + value.len();
            if requested > limit {
                return Err(StoreError::QuotaExceeded { requested, limit });
            }
        }

        self.values
            .borrow_mut()
            .insert(String::from(key), String::from(value));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
