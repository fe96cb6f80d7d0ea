//! Tabletop Desktop State Storage
//!
//! The desktop persists its whole state as a single JSON snapshot under one
//! key. This crate provides the key-value slot that snapshot lives in:
//!
//! - **Trait**: [`StateStore`] - get/set/remove of string values by key
//! - **Memory**: [`MemoryStore`] - `BTreeMap` backed, optional byte quota
//! - **File**: [`FileStore`] - one file per key inside a directory
//!
//! # Design Principles
//!
//! 1. **Full-snapshot writes**: every `set` overwrites the previous value
//! 2. **Shared access**: methods take `&self`; implementations use interior
//!    mutability so a store can be shared through `Rc`
//! 3. **No partial state**: a failed `set` leaves the previous value in place

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::rc::Rc;

/// A durable key-value slot for serialized desktop state.
pub trait StateStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: StateStore + ?Sized> StateStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Validate a storage key.
///
/// Keys must be non-empty and may only contain ASCII alphanumerics, `-`,
/// `_` and `.` (but not `..`), so they can double as file names.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::invalid_key("key is empty"));
    }
    if key.contains("..") {
        return Err(StoreError::invalid_key(key));
    }
    let valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(StoreError::invalid_key(key));
    }
    Ok(())
}
