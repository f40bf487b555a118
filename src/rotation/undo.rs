//! Single-level undo.

use crate::locks::LockRegistry;
use crate::store::RosterStore;

/// Everything an undo restores.
///
/// Cloning is cheap: the store is built on persistent collections and the
/// lock set is small.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub store: RosterStore,
    pub locks: LockRegistry,
}

/// One optional checkpoint, overwritten by every new save.
///
/// Not a history stack: only the most recent operation can be reverted.
#[derive(Clone, Debug, Default)]
pub struct UndoSlot {
    last: Option<Checkpoint>,
}

impl UndoSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored checkpoint.
    pub fn save(&mut self, checkpoint: Checkpoint) {
        self.last = Some(checkpoint);
    }

    /// Take the checkpoint, leaving the slot empty.
    pub fn take(&mut self) -> Option<Checkpoint> {
        self.last.take()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.last.is_some()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Registrant, RegistrantId};

    #[test]
    fn test_save_overwrites() {
        let mut slot = UndoSlot::new();
        let mut first = Checkpoint::default();
        first.store.insert(Registrant::new(RegistrantId::from("a"), "A"));

        slot.save(first);
        slot.save(Checkpoint::default());

        assert_eq!(slot.take(), Some(Checkpoint::default()));
    }

    #[test]
    fn test_take_consumes() {
        let mut slot = UndoSlot::new();
        slot.save(Checkpoint::default());

        assert!(slot.is_available());
        assert!(slot.take().is_some());
        assert!(!slot.is_available());
        assert!(slot.take().is_none());
    }
}
