//! Roster store: registrants, squads and the rotation queue.
//!
//! The store holds data and offers mutation primitives. It enforces
//! referential integrity (every squad or queue entry names a registrant,
//! removal cascades) but no rotation rules; those live in
//! [`RotationController`](crate::rotation::RotationController).
//!
//! Registrants are kept by id in an `im::HashMap` with a separate
//! registration order. Squads and the queue hold ids in `im::Vector`s, so
//! cloning the whole store for an undo checkpoint is O(1).

use im::{HashMap as ImHashMap, Vector};
use rustc_hash::FxHashSet;

use super::snapshot::RosterSnapshot;
use crate::core::{Registrant, RegistrantId, Side, SideMap};

/// The four core collections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterStore {
    registrants: ImHashMap<RegistrantId, Registrant>,

    /// Registration order.
    order: Vector<RegistrantId>,

    squads: SideMap<Vector<RegistrantId>>,

    /// Next up, front first.
    queue: Vector<RegistrantId>,
}

impl RosterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from plain collections.
    ///
    /// Restored data is not trusted: duplicate registrants keep their first
    /// record, entries naming unknown registrants are dropped, and each
    /// registrant is placed at most once (squad A, then squad B, then the
    /// queue).
    #[must_use]
    pub fn from_snapshot(snapshot: &RosterSnapshot) -> Self {
        let mut store = Self::new();
        for registrant in &snapshot.registrants {
            store.insert(registrant.clone());
        }

        let mut placed: FxHashSet<RegistrantId> = FxHashSet::default();
        let mut keep = |store: &Self, r: &Registrant| store.contains(&r.id) && placed.insert(r.id.clone());

        let squad_a: Vector<_> = snapshot
            .squad_a
            .iter()
            .filter(|r| keep(&store, *r))
            .map(|r| r.id.clone())
            .collect();
        let squad_b: Vector<_> = snapshot
            .squad_b
            .iter()
            .filter(|r| keep(&store, *r))
            .map(|r| r.id.clone())
            .collect();
        let queue: Vector<_> = snapshot
            .queue
            .iter()
            .filter(|r| keep(&store, *r))
            .map(|r| r.id.clone())
            .collect();

        store.squads = SideMap::new(squad_a, squad_b);
        store.queue = queue;
        store
    }

    /// Materialize the four collections as plain records.
    #[must_use]
    pub fn to_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            registrants: self.registrants().cloned().collect(),
            squad_a: self.resolve(&self.squads[Side::A]),
            squad_b: self.resolve(&self.squads[Side::B]),
            queue: self.resolve(&self.queue),
        }
    }

    // === Registrants ===

    /// Number of registrants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &RegistrantId) -> bool {
        self.registrants.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &RegistrantId) -> Option<&Registrant> {
        self.registrants.get(id)
    }

    pub fn get_mut(&mut self, id: &RegistrantId) -> Option<&mut Registrant> {
        self.registrants.get_mut(id)
    }

    /// Registrants in registration order.
    pub fn registrants(&self) -> impl Iterator<Item = &Registrant> {
        self.order.iter().filter_map(|id| self.registrants.get(id))
    }

    /// Add a registrant.
    ///
    /// Returns false (and changes nothing) if the id is already taken.
    pub fn insert(&mut self, registrant: Registrant) -> bool {
        if self.registrants.contains_key(&registrant.id) {
            return false;
        }
        self.order.push_back(registrant.id.clone());
        self.registrants.insert(registrant.id.clone(), registrant);
        true
    }

    /// Remove a registrant from the roster, the squads and the queue.
    ///
    /// Returns the removed record, or `None` if the id was unknown.
    pub fn remove(&mut self, id: &RegistrantId) -> Option<Registrant> {
        let removed = self.registrants.remove(id)?;
        self.order.retain(|e| e != id);
        self.queue.retain(|e| e != id);
        for side in Side::BOTH {
            self.squads[side].retain(|e| e != id);
        }
        Some(removed)
    }

    /// Apply `f` to every registrant.
    pub fn update_all(&mut self, mut f: impl FnMut(&mut Registrant)) {
        for (_, registrant) in self.registrants.iter_mut() {
            f(registrant);
        }
    }

    /// Look up records for a sequence of ids, skipping unknown ones.
    #[must_use]
    pub fn resolve<'a>(&self, ids: impl IntoIterator<Item = &'a RegistrantId>) -> Vec<Registrant> {
        ids.into_iter()
            .filter_map(|id| self.registrants.get(id).cloned())
            .collect()
    }

    // === Queue ===

    /// Queue ids, front first.
    #[must_use]
    pub fn queue(&self) -> &Vector<RegistrantId> {
        &self.queue
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_queued(&self, id: &RegistrantId) -> bool {
        self.queue.contains(id)
    }

    /// Append to the back of the queue.
    pub fn push_queue(&mut self, id: RegistrantId) {
        self.queue.push_back(id);
    }

    /// Append several ids to the back of the queue, in order.
    pub fn extend_queue(&mut self, ids: impl IntoIterator<Item = RegistrantId>) {
        self.queue.extend(ids);
    }

    /// Remove an id from the queue.
    ///
    /// Returns true if it was queued.
    pub fn remove_from_queue(&mut self, id: &RegistrantId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|e| e != id);
        self.queue.len() != before
    }

    /// Remove and return the first `n` queued ids (fewer if the queue is
    /// shorter).
    pub fn take_queue_front(&mut self, n: usize) -> Vector<RegistrantId> {
        let n = n.min(self.queue.len());
        let rest = self.queue.split_off(n);
        std::mem::replace(&mut self.queue, rest)
    }

    /// Replace the queue wholesale.
    pub fn set_queue(&mut self, ids: Vector<RegistrantId>) {
        self.queue = ids;
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    // === Squads ===

    /// Squad member ids in order.
    #[must_use]
    pub fn squad(&self, side: Side) -> &Vector<RegistrantId> {
        &self.squads[side]
    }

    /// The side a registrant is placed on, if any.
    #[must_use]
    pub fn squad_of(&self, id: &RegistrantId) -> Option<Side> {
        Side::BOTH.into_iter().find(|&side| self.squads[side].contains(id))
    }

    /// Replace a squad wholesale.
    pub fn set_squad(&mut self, side: Side, ids: Vector<RegistrantId>) {
        self.squads[side] = ids;
    }

    /// Remove and return both squads, leaving them empty.
    pub fn take_squads(&mut self) -> SideMap<Vector<RegistrantId>> {
        std::mem::take(&mut self.squads)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
