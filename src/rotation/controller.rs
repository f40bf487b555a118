//! Rotation controller.
//!
//! The controller owns the roster state and applies every operation the
//! host exposes: registrant edits, queue toggles, locks, allocation, squad
//! replacement, merging and undo.
//!
//! ## Conventions
//!
//! - Unknown or stale ids are not errors. Operations on them return
//!   `Ok(false)` and change nothing.
//! - Validation failures return an error and change nothing.
//! - Every operation that changes state first saves an undo checkpoint.
//! - While a delayed operation is pending, every mutation returns
//!   [`RosterError::Busy`]. Queries always work.

use std::time::Instant;

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::pending::{Completion, RotationOp, Ticket};
use super::undo::{Checkpoint, UndoSlot};
use crate::allocation::{Allocator, CategoryBalanced};
use crate::core::registrant::normalize_name;
use crate::core::{IdGenerator, Registrant, RegistrantId, RosterConfig, RosterError, Side};
use crate::locks::LockRegistry;
use crate::store::{RosterSnapshot, RosterStore};

/// Result alias for controller operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Owns and mutates the roster.
#[derive(Clone, Debug)]
pub struct RotationController<A: Allocator = CategoryBalanced> {
    config: RosterConfig,
    allocator: A,
    store: RosterStore,
    locks: LockRegistry,

    /// Session-only payment marks.
    paid: FxHashSet<RegistrantId>,

    ids: IdGenerator,
    undo: UndoSlot,

    /// Set while a delayed operation is in flight (the busy flag).
    pending: Option<Ticket>,
}

impl RotationController<CategoryBalanced> {
    /// Create an empty roster with the category-balanced allocator.
    #[must_use]
    pub fn new(config: RosterConfig) -> Self {
        let allocator = CategoryBalanced::from_config(&config);
        Self::with_allocator(config, allocator)
    }

    /// Restore a roster from persisted collections.
    #[must_use]
    pub fn restore(config: RosterConfig, snapshot: &RosterSnapshot) -> Self {
        let mut controller = Self::new(config);
        controller.store = RosterStore::from_snapshot(snapshot);
        controller
    }
}

impl<A: Allocator> RotationController<A> {
    /// Create an empty roster with a custom allocator.
    #[must_use]
    pub fn with_allocator(config: RosterConfig, allocator: A) -> Self {
        let ids = IdGenerator::new(config.id_seed);
        Self {
            config,
            allocator,
            store: RosterStore::new(),
            locks: LockRegistry::new(),
            paid: FxHashSet::default(),
            ids,
            undo: UndoSlot::new(),
            pending: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    #[must_use]
    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// The four collections as plain records.
    #[must_use]
    pub fn snapshot(&self) -> RosterSnapshot {
        self.store.to_snapshot()
    }

    /// Current state as an undo checkpoint would capture it.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            store: self.store.clone(),
            locks: self.locks.clone(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &RegistrantId) -> Option<&Registrant> {
        self.store.get(id)
    }

    /// Registrants in registration order.
    #[must_use]
    pub fn registrants(&self) -> Vec<Registrant> {
        self.store.registrants().cloned().collect()
    }

    #[must_use]
    pub fn squad(&self, side: Side) -> Vec<Registrant> {
        self.store.resolve(self.store.squad(side))
    }

    #[must_use]
    pub fn queue(&self) -> Vec<Registrant> {
        self.store.resolve(self.store.queue())
    }

    /// Locked registrants in registration order.
    #[must_use]
    pub fn locked(&self) -> Vec<Registrant> {
        self.store
            .registrants()
            .filter(|r| self.locks.is_locked(&r.id))
            .cloned()
            .collect()
    }

    /// Registrants neither queued, placed nor locked.
    #[must_use]
    pub fn idle(&self) -> Vec<Registrant> {
        self.store
            .registrants()
            .filter(|r| {
                !self.locks.is_locked(&r.id)
                    && !self.store.is_queued(&r.id)
                    && self.store.squad_of(&r.id).is_none()
            })
            .cloned()
            .collect()
    }

    /// Registrants by goals, highest first; ties keep registration order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<Registrant> {
        let mut board = self.registrants();
        board.sort_by(|a, b| b.goals.cmp(&a.goals));
        board
    }

    #[must_use]
    pub fn is_locked(&self, id: &RegistrantId) -> bool {
        self.locks.is_locked(id)
    }

    #[must_use]
    pub fn is_paid(&self, id: &RegistrantId) -> bool {
        self.paid.contains(id)
    }

    /// Whether a delayed operation is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The operation in flight, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.is_available()
    }

    // === Registrants ===

    /// Register a new player.
    pub fn register(&mut self, name: &str) -> RosterResult<RegistrantId> {
        self.ensure_idle()?;
        let name = normalize_name(name).ok_or(RosterError::EmptyName)?;

        self.save_checkpoint();
        let id = self.insert_new(name);
        debug!(%id, "registered");
        Ok(id)
    }

    /// Register every non-blank name, in order.
    ///
    /// Fails with `EmptyName` only if no name is usable.
    pub fn register_many<I, S>(&mut self, names: I) -> RosterResult<Vec<RegistrantId>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_idle()?;
        let names: Vec<String> = names
            .into_iter()
            .filter_map(|n| normalize_name(n.as_ref()))
            .collect();
        if names.is_empty() {
            return Err(RosterError::EmptyName);
        }

        self.save_checkpoint();
        let ids: Vec<_> = names.into_iter().map(|name| self.insert_new(name)).collect();
        info!(count = ids.len(), "registered players");
        Ok(ids)
    }

    /// Change a registrant's name.
    pub fn rename(&mut self, id: &RegistrantId, name: &str) -> RosterResult<bool> {
        self.ensure_idle()?;
        let name = normalize_name(name).ok_or(RosterError::EmptyName)?;
        if !self.store.contains(id) {
            debug!(%id, "rename: unknown registrant");
            return Ok(false);
        }

        self.save_checkpoint();
        if let Some(registrant) = self.store.get_mut(id) {
            registrant.name = name;
        }
        Ok(true)
    }

    /// Delete a registrant everywhere: roster, squads, queue, locks.
    pub fn remove(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        if !self.store.contains(id) {
            debug!(%id, "remove: unknown registrant");
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.remove(id);
        self.locks.unlock(id);
        self.paid.remove(id);
        debug!(%id, "removed");
        Ok(true)
    }

    /// Add a goal.
    pub fn increment_goals(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        if !self.store.contains(id) {
            return Ok(false);
        }

        self.save_checkpoint();
        if let Some(registrant) = self.store.get_mut(id) {
            registrant.score();
        }
        Ok(true)
    }

    /// Remove a goal. Already at zero is a no-op.
    pub fn decrement_goals(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        match self.store.get(id) {
            Some(registrant) if registrant.goals > 0 => {}
            _ => return Ok(false),
        }

        self.save_checkpoint();
        if let Some(registrant) = self.store.get_mut(id) {
            registrant.unscore();
        }
        Ok(true)
    }

    /// Set every goal counter to zero.
    pub fn reset_goals(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        if self.store.registrants().all(|r| r.goals == 0) {
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.update_all(|r| r.goals = 0);
        info!("goals reset");
        Ok(true)
    }

    /// Flip a registrant's payment mark.
    ///
    /// Returns the new mark, or `None` for unknown ids. Marks are not part
    /// of undo and are not persisted.
    pub fn toggle_paid(&mut self, id: &RegistrantId) -> Option<bool> {
        if !self.store.contains(id) {
            return None;
        }
        if self.paid.remove(id) {
            Some(false)
        } else {
            self.paid.insert(id.clone());
            Some(true)
        }
    }

    /// Remove every registrant, squad, queue entry, lock and payment mark.
    pub fn reset_roster(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        if self.store.is_empty() && self.locks.is_empty() {
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.clear();
        self.locks.clear();
        self.paid.clear();
        info!("roster reset");
        Ok(true)
    }

    // === Queue and locks ===

    /// Add an idle registrant to the queue, or take a queued one out.
    ///
    /// Locked and placed registrants are left alone.
    pub fn toggle_activate(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        if !self.store.contains(id) || self.locks.is_locked(id) || self.store.squad_of(id).is_some() {
            debug!(%id, "toggle_activate: not eligible");
            return Ok(false);
        }

        self.save_checkpoint();
        if !self.store.remove_from_queue(id) {
            self.store.push_queue(id.clone());
        }
        Ok(true)
    }

    /// Take a registrant out of the queue.
    pub fn deactivate(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        if !self.store.is_queued(id) {
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.remove_from_queue(id);
        Ok(true)
    }

    /// Hold a registrant out of rotation.
    ///
    /// Removes it from the queue. Placed registrants cannot be locked.
    pub fn lock(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        if !self.store.contains(id) || self.locks.is_locked(id) || self.store.squad_of(id).is_some() {
            debug!(%id, "lock: not eligible");
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.remove_from_queue(id);
        self.locks.lock(id.clone());
        debug!(%id, "locked");
        Ok(true)
    }

    /// Release a lock and append the registrant to the queue.
    pub fn unlock(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        if !self.locks.is_locked(id) {
            return Ok(false);
        }

        self.save_checkpoint();
        self.locks.unlock(id);
        if self.store.contains(id) {
            self.store.push_queue(id.clone());
        }
        debug!(%id, "unlocked");
        Ok(true)
    }

    /// Empty the queue. Nobody is deleted.
    pub fn clear_queue(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        if self.store.queue().is_empty() {
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.clear_queue();
        Ok(true)
    }

    // === Delayed rotation ===

    /// Schedule an allocation from the head of the queue.
    pub fn run_allocation(&mut self, now: Instant) -> RosterResult<Ticket> {
        self.request(RotationOp::Allocate, now)
    }

    /// Schedule the replacement of a losing squad.
    pub fn squad_lost(&mut self, side: Side, now: Instant) -> RosterResult<Ticket> {
        self.request(RotationOp::SquadLost(side), now)
    }

    /// Validate and schedule a delayed operation.
    ///
    /// The controller is busy until [`complete_pending`](Self::complete_pending)
    /// applies it.
    pub fn request(&mut self, op: RotationOp, now: Instant) -> RosterResult<Ticket> {
        self.ensure_idle()?;
        self.validate(op)?;

        let ticket = Ticket {
            op,
            ready_at: now + self.config.busy_delay,
        };
        self.pending = Some(ticket);
        debug!(%op, delay_ms = self.config.busy_delay.as_millis() as u64, "rotation scheduled");
        Ok(ticket)
    }

    /// Apply the pending operation if its delay has elapsed.
    ///
    /// Preconditions are checked again before applying. Either way the
    /// controller is idle afterwards, unless the delay has not elapsed.
    pub fn complete_pending(&mut self, now: Instant) -> RosterResult<Completion> {
        let ticket = self.pending.ok_or(RosterError::NoPendingOperation)?;
        if !ticket.is_ready(now) {
            return Ok(Completion::NotReady {
                remaining: ticket.remaining(now),
            });
        }

        self.pending = None;
        self.apply(ticket.op)?;
        Ok(Completion::Applied(ticket.op))
    }

    /// Allocate without waiting for the busy delay.
    pub fn run_allocation_now(&mut self) -> RosterResult<()> {
        self.request_now(RotationOp::Allocate)
    }

    /// Replace a losing squad without waiting for the busy delay.
    pub fn squad_lost_now(&mut self, side: Side) -> RosterResult<()> {
        self.request_now(RotationOp::SquadLost(side))
    }

    fn request_now(&mut self, op: RotationOp) -> RosterResult<()> {
        let ticket = self.request(op, Instant::now())?;
        self.complete_pending(ticket.ready_at).map(|_| ())
    }

    fn validate(&self, op: RotationOp) -> RosterResult<()> {
        let capacity = self.config.squad_capacity;
        match op {
            RotationOp::Allocate => {
                if self.store.queue().is_empty() {
                    return Err(RosterError::QueueEmpty);
                }
            }
            RotationOp::SquadLost(side) => {
                let size = self.store.squad(side).len();
                if size < capacity {
                    return Err(RosterError::InsufficientSquadSize { side, size, required: capacity });
                }
                // The losers rejoin the queue before the refill.
                let available = self.store.queue_len() + capacity;
                if available < capacity {
                    return Err(RosterError::InsufficientQueue { available, required: capacity });
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, op: RotationOp) -> RosterResult<()> {
        self.validate(op)?;
        self.save_checkpoint();
        match op {
            RotationOp::Allocate => self.apply_allocation(),
            RotationOp::SquadLost(side) => self.apply_squad_lost(side),
        }
        Ok(())
    }

    fn apply_allocation(&mut self) {
        let head = self.store.take_queue_front(self.config.batch_size);
        let candidates = self.store.resolve(&head);
        let locked = self.locks.restricted_to(head.iter());

        let allocation = self.allocator.allocate(&candidates, &locked);

        let mut queue: Vector<RegistrantId> = allocation.residual.iter().map(|r| r.id.clone()).collect();
        queue.append(self.store.queue().clone());
        self.store.set_queue(queue);

        for side in Side::BOTH {
            let members = allocation.squads[side].iter().map(|r| r.id.clone()).collect();
            self.store.set_squad(side, members);
        }

        info!(
            squad_a = allocation.squads[Side::A].len(),
            squad_b = allocation.squads[Side::B].len(),
            queued = self.store.queue_len(),
            "squads allocated"
        );
    }

    fn apply_squad_lost(&mut self, side: Side) {
        let capacity = self.config.squad_capacity;

        let mut losers = self.store.squad(side).clone();
        losers.truncate(capacity);
        self.store.extend_queue(losers);

        let replacement = self.store.take_queue_front(capacity);
        self.store.set_squad(side, replacement);

        info!(loser = %side, stays = %side.other(), queued = self.store.queue_len(), "squad replaced");
    }

    // === Immediate rotation ===

    /// Reshuffle the placed players between the squads.
    ///
    /// The first `squad_capacity` of A followed by the first
    /// `squad_capacity` of B are dealt alternately: even positions to A,
    /// odd positions to B. Category and locks are not consulted.
    pub fn merge_squads(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        let capacity = self.config.squad_capacity;

        let combined: SmallVec<[RegistrantId; 10]> = Side::BOTH
            .into_iter()
            .flat_map(|side| self.store.squad(side).iter().take(capacity).cloned())
            .collect();
        if combined.is_empty() {
            return Ok(false);
        }

        self.save_checkpoint();
        let mut dealt: [Vector<RegistrantId>; 2] = Default::default();
        for (i, id) in combined.into_iter().enumerate() {
            dealt[i % 2].push_back(id);
        }
        let [squad_a, squad_b] = dealt;
        self.store.set_squad(Side::A, squad_a);
        self.store.set_squad(Side::B, squad_b);

        info!("squads merged");
        Ok(true)
    }

    /// Send both squads back to the end of the queue, A before B.
    pub fn clear_squads_to_queue(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        if Side::BOTH.iter().all(|&side| self.store.squad(side).is_empty()) {
            return Ok(false);
        }

        self.save_checkpoint();
        let (squad_a, squad_b) = self.store.take_squads().into_pair();
        self.store.extend_queue(squad_a);
        self.store.extend_queue(squad_b);
        debug!(queued = self.store.queue_len(), "squads cleared to queue");
        Ok(true)
    }

    /// Swap a placed registrant for the head of the queue.
    ///
    /// The replacement joins the end of the squad and the substituted
    /// registrant joins the end of the queue.
    pub fn substitute(&mut self, id: &RegistrantId) -> RosterResult<bool> {
        self.ensure_idle()?;
        let Some(side) = self.store.squad_of(id) else {
            debug!(%id, "substitute: not placed");
            return Ok(false);
        };
        if self.store.queue().is_empty() {
            return Err(RosterError::QueueEmpty);
        }

        self.save_checkpoint();
        let mut squad = self.store.squad(side).clone();
        squad.retain(|e| e != id);
        squad.append(self.store.take_queue_front(1));
        self.store.set_squad(side, squad);
        self.store.push_queue(id.clone());

        debug!(%id, %side, "substituted");
        Ok(true)
    }

    /// End the session's match: empty both squads and the queue.
    pub fn finish_match(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        let nothing_placed = Side::BOTH.iter().all(|&side| self.store.squad(side).is_empty());
        if nothing_placed && self.store.queue().is_empty() {
            return Ok(false);
        }

        self.save_checkpoint();
        self.store.take_squads();
        self.store.clear_queue();
        info!("match finished");
        Ok(true)
    }

    // === Undo ===

    /// Revert the most recent state change.
    ///
    /// Returns false if there is nothing to undo. A second call without an
    /// intervening change has no effect.
    pub fn undo(&mut self) -> RosterResult<bool> {
        self.ensure_idle()?;
        let Some(checkpoint) = self.undo.take() else {
            return Ok(false);
        };

        self.store = checkpoint.store;
        self.locks = checkpoint.locks;
        let store = &self.store;
        self.paid.retain(|id| store.contains(id));
        info!("undone");
        Ok(true)
    }

    // === Internals ===

    fn ensure_idle(&self) -> RosterResult<()> {
        if self.pending.is_some() {
            Err(RosterError::Busy)
        } else {
            Ok(())
        }
    }

    fn save_checkpoint(&mut self) {
        let checkpoint = self.checkpoint();
        self.undo.save(checkpoint);
    }

    fn insert_new(&mut self, name: String) -> RegistrantId {
        let store = &self.store;
        let id = self.ids.next_unused(|candidate| store.contains(candidate));
        let registrant = Registrant::new(id.clone(), name).with_category(self.config.default_category.clone());
        self.store.insert(registrant);
        id
    }
}
