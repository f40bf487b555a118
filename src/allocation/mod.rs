//! Allocation: partitioning the queue head into two balanced squads.
//!
//! Allocation is a pure function of its inputs. It never touches the live
//! roster; the rotation controller feeds it the head of the queue and
//! applies the result.
//!
//! ## Example
//!
//! ```
//! use pickup_roster::allocation::allocate;
//! use pickup_roster::core::{Registrant, RegistrantId, Side};
//! use rustc_hash::FxHashSet;
//!
//! let candidates: Vec<_> = ["a", "b", "c"]
//!     .iter()
//!     .map(|id| Registrant::new(RegistrantId::from(*id), id.to_uppercase()))
//!     .collect();
//!
//! let result = allocate(&candidates, &FxHashSet::default());
//!
//! assert_eq!(result.squad(Side::A).len(), 2);
//! assert_eq!(result.squad(Side::B).len(), 1);
//! assert!(result.residual.is_empty());
//! ```

mod engine;

pub use engine::CategoryBalanced;

use crate::core::{Registrant, RegistrantId, Side, SideMap};
use crate::locks::LockQuery;

/// Result of one allocation round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    /// New squads, in assignment order.
    pub squads: SideMap<Vec<Registrant>>,

    /// What stays queued: locked batch members, then the overflow beyond
    /// the batch, minus anyone placed.
    pub residual: Vec<Registrant>,

    /// Players cut by the squad capacity. They are neither placed nor
    /// returned to the queue.
    pub dropped: Vec<Registrant>,
}

impl Allocation {
    /// Members assigned to a side.
    #[must_use]
    pub fn squad(&self, side: Side) -> &[Registrant] {
        &self.squads[side]
    }

    /// Ids of every placed registrant, A first.
    pub fn placed_ids(&self) -> impl Iterator<Item = &RegistrantId> {
        Side::BOTH
            .into_iter()
            .flat_map(move |side| self.squads[side].iter().map(|r| &r.id))
    }
}

/// Strategy that turns queued candidates into squads.
///
/// [`CategoryBalanced`] is the engine's strategy; the trait is the seam for
/// hosts that want a different split.
pub trait Allocator {
    /// Allocate `candidates` (queue order) honoring `locks`.
    ///
    /// Must be deterministic and must never place one registrant in both
    /// squads.
    fn allocate(&self, candidates: &[Registrant], locks: &dyn LockQuery) -> Allocation;
}

/// Allocate with the default batch size and squad capacity.
#[must_use]
pub fn allocate(candidates: &[Registrant], locks: &dyn LockQuery) -> Allocation {
    CategoryBalanced::default().allocate(candidates, locks)
}
