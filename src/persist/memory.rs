//! In-memory key-value backend for tests and local runs.

use rustc_hash::FxHashMap;

use super::KeyValueStore;
use crate::core::StorageError;

/// Key-value store backed by a hash map.
///
/// Writes can be made to fail, which exercises the fire-and-forget save
/// path.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail.
    #[must_use]
    pub fn with_failing_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    pub fn set_failing_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Put a raw value, bypassing the failure switch.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend(format!("write to {key} rejected")));
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
