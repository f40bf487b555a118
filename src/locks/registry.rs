//! Lock set with set semantics.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::LockQuery;
use crate::core::RegistrantId;

/// Set of registrant ids excluded from rotation.
///
/// Locking an id that is already locked is a no-op, as is unlocking one
/// that is not.
///
/// ## Example
///
/// ```
/// use pickup_roster::core::RegistrantId;
/// use pickup_roster::locks::LockRegistry;
///
/// let mut locks = LockRegistry::new();
/// let id = RegistrantId::from("r-1");
///
/// assert!(locks.lock(id.clone()));
/// assert!(!locks.lock(id.clone())); // already locked
/// assert!(locks.is_locked(&id));
///
/// assert!(locks.unlock(&id));
/// assert!(locks.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRegistry {
    locked: FxHashSet<RegistrantId>,
}

impl LockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock an id.
    ///
    /// Returns true if the id was not already locked.
    pub fn lock(&mut self, id: RegistrantId) -> bool {
        self.locked.insert(id)
    }

    /// Release an id.
    ///
    /// Returns true if the id was locked.
    pub fn unlock(&mut self, id: &RegistrantId) -> bool {
        self.locked.remove(id)
    }

    /// Check whether an id is locked.
    #[must_use]
    pub fn is_locked(&self, id: &RegistrantId) -> bool {
        self.locked.contains(id)
    }

    /// Number of locked ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked.is_empty()
    }

    /// Iterate over locked ids (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &RegistrantId> {
        self.locked.iter()
    }

    /// The subset of locks that apply to the given ids.
    ///
    /// Allocation only looks at the head of the queue, so the controller
    /// hands it the locks relevant to that batch.
    #[must_use]
    pub fn restricted_to<'a>(&self, ids: impl IntoIterator<Item = &'a RegistrantId>) -> FxHashSet<RegistrantId> {
        ids.into_iter()
            .filter(|id| self.locked.contains(*id))
            .cloned()
            .collect()
    }

    /// Keep only the locks matching a predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&RegistrantId) -> bool) {
        self.locked.retain(|id| keep(id));
    }

    /// Release every lock.
    pub fn clear(&mut self) {
        self.locked.clear();
    }
}

impl LockQuery for LockRegistry {
    fn is_locked(&self, id: &RegistrantId) -> bool {
        LockRegistry::is_locked(self, id)
    }
}
