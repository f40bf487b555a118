//! # pickup-roster
//!
//! Rotation engine for pickup matches: a roster of registrants, two squads
//! and a waiting queue, with category-balanced allocation and
//! winner-stays rotation.
//!
//! ## Design Principles
//!
//! 1. **Plain data in, plain data out**: the engine holds no I/O. Hosts
//!    restore four collections at startup and persist them after every
//!    mutation.
//!
//! 2. **Deterministic**: allocation depends only on queue order and
//!    categories. Ids come from a seeded generator.
//!
//! 3. **Cheap undo**: state lives in persistent collections (`im`), so a
//!    full checkpoint before each mutation is O(1).
//!
//! ## Modules
//!
//! - `core`: Registrants, sides, configuration, ids, errors
//! - `store`: The four collections and text import
//! - `locks`: Registrants held out of rotation
//! - `allocation`: Splitting the queue head into squads
//! - `rotation`: The controller, delayed operations and undo
//! - `persist`: Key-value persistence of the collections

pub mod allocation;
pub mod core;
pub mod locks;
pub mod persist;
pub mod rotation;
pub mod store;

pub use crate::core::{
    Category, IdGenerator, Registrant, RegistrantId, RosterConfig, RosterError, Side, SideMap, StorageError,
};

pub use crate::allocation::{allocate, Allocation, Allocator, CategoryBalanced};
pub use crate::locks::{LockQuery, LockRegistry};
pub use crate::persist::{load_snapshot, save_snapshot, KeyValueStore, MemoryStore, RosterSession};
pub use crate::rotation::{Checkpoint, Completion, RotationController, RotationOp, Ticket};
pub use crate::store::{parse_name_list, RosterSnapshot, RosterStore};
