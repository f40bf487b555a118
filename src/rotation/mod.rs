//! Rotation: driving allocation and replacement against the live roster.
//!
//! ## Key Types
//!
//! - `RotationController`: owns the roster, locks, undo slot and busy state
//! - `RotationOp` / `Ticket` / `Completion`: delayed operations
//! - `Checkpoint` / `UndoSlot`: single-level undo
//!
//! ## Example
//!
//! ```
//! use std::time::Instant;
//! use pickup_roster::core::{RosterConfig, Side};
//! use pickup_roster::rotation::{Completion, RotationController};
//!
//! let mut roster = RotationController::new(RosterConfig::default());
//! for name in ["Ana", "Bia", "Caio", "Duda"] {
//!     let id = roster.register(name).unwrap();
//!     roster.toggle_activate(&id).unwrap();
//! }
//!
//! let now = Instant::now();
//! let ticket = roster.run_allocation(now).unwrap();
//! assert!(roster.is_busy());
//!
//! let done = roster.complete_pending(ticket.ready_at).unwrap();
//! assert!(matches!(done, Completion::Applied(_)));
//! assert_eq!(roster.squad(Side::A).len(), 2);
//! assert_eq!(roster.squad(Side::B).len(), 2);
//! ```

pub mod controller;
pub mod pending;
pub mod undo;

pub use controller::RotationController;
pub use pending::{Completion, RotationOp, Ticket};
pub use undo::{Checkpoint, UndoSlot};
