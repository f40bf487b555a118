//! Delayed rotation operations.
//!
//! Allocation and squad replacement are shown to the operator with a fixed
//! minimum latency. The controller models that as a scheduled completion:
//! a request records the operation and when it becomes ready, and the host
//! calls back once its timer fires. While an operation is pending the
//! controller is busy and refuses other mutations.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Rotation operations subject to the busy delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationOp {
    /// Split the queue head into new squads.
    Allocate,
    /// The given squad lost and is replaced from the queue.
    SquadLost(Side),
}

impl std::fmt::Display for RotationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationOp::Allocate => f.write_str("allocate"),
            RotationOp::SquadLost(side) => write!(f, "{side} lost"),
        }
    }
}

/// An accepted request and the moment it may complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub op: RotationOp,
    pub ready_at: Instant,
}

impl Ticket {
    /// Time left before `now` reaches `ready_at`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.ready_at.saturating_duration_since(now)
    }

    #[must_use]
    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.ready_at
    }
}

/// Result of polling a pending operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The delay has not elapsed; nothing changed.
    NotReady { remaining: Duration },
    /// The operation was applied and the controller is idle again.
    Applied(RotationOp),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_remaining() {
        let start = Instant::now();
        let ticket = Ticket {
            op: RotationOp::Allocate,
            ready_at: start + Duration::from_millis(500),
        };

        assert_eq!(ticket.remaining(start), Duration::from_millis(500));
        assert!(!ticket.is_ready(start));
        assert!(ticket.is_ready(start + Duration::from_millis(500)));
        assert_eq!(ticket.remaining(start + Duration::from_secs(2)), Duration::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(RotationOp::Allocate.to_string(), "allocate");
        assert_eq!(RotationOp::SquadLost(Side::B).to_string(), "Squad B lost");
    }
}
