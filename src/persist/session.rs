//! A controller bound to a persistence backend.

use std::time::Instant;

use tracing::{debug, warn};

use super::{load_snapshot, save_snapshot, KeyValueStore};
use crate::core::{RosterConfig, RosterError};
use crate::rotation::{Completion, RotationController};

/// Restores a roster from a backend and writes it back after every
/// successful mutation.
///
/// ```
/// use pickup_roster::core::RosterConfig;
/// use pickup_roster::persist::{MemoryStore, RosterSession};
///
/// let mut session = RosterSession::open(RosterConfig::default(), MemoryStore::new());
/// session.apply(|roster| roster.register("Ana")).unwrap();
///
/// let backend = session.into_backend();
/// let reopened = RosterSession::open(RosterConfig::default(), backend);
/// assert_eq!(reopened.roster().registrants().len(), 1);
/// ```
#[derive(Debug)]
pub struct RosterSession<S: KeyValueStore> {
    roster: RotationController,
    backend: S,
}

impl<S: KeyValueStore> RosterSession<S> {
    /// Restore the roster stored in `backend`.
    pub fn open(config: RosterConfig, backend: S) -> Self {
        let snapshot = load_snapshot(&backend);
        if snapshot.is_empty() {
            debug!("no stored roster, starting empty");
        } else {
            debug!(
                registrants = snapshot.registrants.len(),
                queued = snapshot.queue.len(),
                "roster restored"
            );
        }
        Self {
            roster: RotationController::restore(config, &snapshot),
            backend,
        }
    }

    /// Read access to the roster.
    #[must_use]
    pub fn roster(&self) -> &RotationController {
        &self.roster
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Run a roster operation and persist the result if it succeeded.
    ///
    /// Persistence failures are logged and never turn a successful
    /// operation into an error.
    pub fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut RotationController) -> Result<T, RosterError>,
    ) -> Result<T, RosterError> {
        let value = op(&mut self.roster)?;
        self.flush();
        Ok(value)
    }

    /// Complete the pending rotation operation, persisting if it applied.
    pub fn complete_pending(&mut self, now: Instant) -> Result<Completion, RosterError> {
        let completion = self.roster.complete_pending(now)?;
        if matches!(completion, Completion::Applied(_)) {
            self.flush();
        }
        Ok(completion)
    }

    /// Write every collection to the backend.
    ///
    /// Returns true if all writes succeeded.
    pub fn flush(&mut self) -> bool {
        let failed = save_snapshot(&mut self.backend, &self.roster.snapshot());
        if failed > 0 {
            warn!(failed, "roster only partially persisted");
        }
        failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;
    use crate::persist::{MemoryStore, QUEUE_KEY};

    #[test]
    fn test_mutation_is_persisted() {
        let mut session = RosterSession::open(RosterConfig::default(), MemoryStore::new());

        let id = session.apply(|r| r.register("Ana")).unwrap();
        session.apply(|r| r.toggle_activate(&id)).unwrap();

        let stored = session.backend().get(QUEUE_KEY).unwrap();
        assert!(stored.contains("Ana"));
    }

    #[test]
    fn test_failed_operation_is_not_persisted() {
        let mut session = RosterSession::open(RosterConfig::default(), MemoryStore::new());

        assert_eq!(session.apply(|r| r.register("  ")), Err(RosterError::EmptyName));
        assert!(session.backend().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let backend = MemoryStore::new().with_failing_writes(true);
        let mut session = RosterSession::open(RosterConfig::default(), backend);

        session.apply(|r| r.register("Ana")).unwrap();

        assert_eq!(session.roster().registrants().len(), 1);
        assert!(!session.flush());
    }

    #[test]
    fn test_delayed_completion_is_persisted() {
        let mut session = RosterSession::open(RosterConfig::default(), MemoryStore::new());
        let id = session.apply(|r| r.register("Ana")).unwrap();
        session.apply(|r| r.toggle_activate(&id)).unwrap();

        let now = Instant::now();
        let ticket = session.apply(|r| r.run_allocation(now)).unwrap();
        session.complete_pending(ticket.ready_at).unwrap();

        let reopened = RosterSession::open(RosterConfig::default(), session.into_backend());
        assert_eq!(reopened.roster().squad(Side::A).len(), 1);
        assert!(reopened.roster().queue().is_empty());
    }
}
