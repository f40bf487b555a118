//! Persistence of the four roster collections.
//!
//! Each collection is stored as one JSON record under a fixed key. Loading
//! is lenient: a missing or unreadable record restores as empty and the
//! other collections are unaffected. Saving is fire-and-forget: failures are
//! logged and the in-memory roster stays authoritative.
//!
//! ## Key Types
//!
//! - [`KeyValueStore`]: the backend seam
//! - [`MemoryStore`]: in-memory backend
//! - [`RosterSession`]: a controller that re-emits its collections after
//!   every mutation

mod memory;
mod session;

pub use memory::MemoryStore;
pub use session::RosterSession;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::core::{Registrant, StorageError};
use crate::store::RosterSnapshot;

/// Key of the registrant collection.
pub const REGISTRANTS_KEY: &str = "registrants";
/// Key of squad A.
pub const SQUAD_A_KEY: &str = "squad_a";
/// Key of squad B.
pub const SQUAD_B_KEY: &str = "squad_b";
/// Key of the rotation queue.
pub const QUEUE_KEY: &str = "queue";

/// String key-value backend.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).store(key, value)
    }
}

/// Read all four collections.
///
/// Never fails: each collection falls back to empty on its own.
pub fn load_snapshot(backend: &impl KeyValueStore) -> RosterSnapshot {
    RosterSnapshot {
        registrants: load_or_default(backend, REGISTRANTS_KEY),
        squad_a: load_or_default(backend, SQUAD_A_KEY),
        squad_b: load_or_default(backend, SQUAD_B_KEY),
        queue: load_or_default(backend, QUEUE_KEY),
    }
}

/// Write all four collections.
///
/// Returns the number of collections that failed to save. Failures are
/// logged and do not stop the remaining writes.
pub fn save_snapshot(backend: &mut impl KeyValueStore, snapshot: &RosterSnapshot) -> usize {
    let collections: [(&str, &[Registrant]); 4] = [
        (REGISTRANTS_KEY, &snapshot.registrants),
        (SQUAD_A_KEY, &snapshot.squad_a),
        (SQUAD_B_KEY, &snapshot.squad_b),
        (QUEUE_KEY, &snapshot.queue),
    ];

    let mut failed = 0;
    for (key, records) in collections {
        if let Err(err) = save_collection(backend, key, records) {
            warn!(key, error = %err, "failed to save collection");
            failed += 1;
        }
    }
    failed
}

fn save_collection(backend: &mut impl KeyValueStore, key: &str, records: &[Registrant]) -> Result<(), StorageError> {
    let json = serde_json::to_string(records)?;
    backend.store(key, &json)
}

fn load_collection<T: DeserializeOwned>(backend: &impl KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
    match backend.load(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn load_or_default<T: DeserializeOwned + Default>(backend: &impl KeyValueStore, key: &str) -> T {
    match load_collection(backend, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "no stored collection");
            T::default()
        }
        Err(err) => {
            warn!(key, error = %err, "failed to load collection, using empty");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegistrantId;

    fn player(id: &str) -> Registrant {
        Registrant::new(RegistrantId::from(id), id)
    }

    #[test]
    fn test_empty_backend_loads_empty() {
        let backend = MemoryStore::new();
        assert_eq!(load_snapshot(&backend), RosterSnapshot::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut backend = MemoryStore::new();
        let snapshot = RosterSnapshot {
            registrants: vec![player("a"), player("b")],
            squad_a: vec![player("a")],
            squad_b: vec![],
            queue: vec![player("b")],
        };

        assert_eq!(save_snapshot(&mut backend, &snapshot), 0);
        assert_eq!(load_snapshot(&backend), snapshot);
    }

    #[test]
    fn test_corrupt_collection_falls_back_alone() {
        let mut backend = MemoryStore::new();
        let snapshot = RosterSnapshot {
            registrants: vec![player("a")],
            queue: vec![player("a")],
            ..RosterSnapshot::default()
        };
        save_snapshot(&mut backend, &snapshot);
        backend.insert_raw(QUEUE_KEY, "{not json");

        let loaded = load_snapshot(&backend);

        assert_eq!(loaded.registrants, snapshot.registrants);
        assert!(loaded.queue.is_empty());
    }

    #[test]
    fn test_failed_writes_are_counted() {
        let mut backend = MemoryStore::new().with_failing_writes(true);

        assert_eq!(save_snapshot(&mut backend, &RosterSnapshot::default()), 4);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_keys() {
        let mut backend = MemoryStore::new();
        save_snapshot(&mut backend, &RosterSnapshot::default());

        for key in [REGISTRANTS_KEY, SQUAD_A_KEY, SQUAD_B_KEY, QUEUE_KEY] {
            assert_eq!(backend.get(key), Some("[]"));
        }
    }
}
