//! Roster store: the registrant pool, both squads and the rotation queue.
//!
//! ## Key Types
//!
//! - `RosterStore`: live collections with mutation primitives
//! - `RosterSnapshot`: plain-data view exchanged with the host
//! - `parse_name_list`: turns pasted text into registrant names

pub mod roster;
pub mod snapshot;
pub mod import;

pub use roster::RosterStore;
pub use snapshot::RosterSnapshot;
pub use import::parse_name_list;
