//! Lock registry: registrants held out of rotation.
//!
//! A locked registrant stays on the roster but is skipped by every queue
//! operation until released. Releasing appends it to the end of the queue;
//! that part lives in the rotation controller, which owns the queue.
//!
//! ## Key Types
//!
//! - `LockQuery`: read-only membership test consumed by allocation
//! - `LockRegistry`: the lock set itself

pub mod registry;

pub use registry::LockRegistry;

use rustc_hash::FxHashSet;

use crate::core::RegistrantId;

/// Membership test for locked registrants.
///
/// Allocation only needs to ask "is this id locked?", so it accepts
/// anything implementing this trait: the live [`LockRegistry`], a plain
/// set, or a slice for small fixtures.
pub trait LockQuery {
    fn is_locked(&self, id: &RegistrantId) -> bool;
}

impl LockQuery for FxHashSet<RegistrantId> {
    fn is_locked(&self, id: &RegistrantId) -> bool {
        self.contains(id)
    }
}

impl LockQuery for [RegistrantId] {
    fn is_locked(&self, id: &RegistrantId) -> bool {
        self.contains(id)
    }
}

impl<T: LockQuery + ?Sized> LockQuery for &T {
    fn is_locked(&self, id: &RegistrantId) -> bool {
        (**self).is_locked(id)
    }
}
