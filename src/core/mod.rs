//! Core roster types: registrants, sides, configuration, ids, errors.
//!
//! Everything here is plain data. Behavior lives in `store`, `allocation`
//! and `rotation`.

pub mod config;
pub mod error;
pub mod registrant;
pub mod rng;
pub mod side;

pub use config::RosterConfig;
pub use error::{RosterError, StorageError};
pub use registrant::{Category, Registrant, RegistrantId};
pub use rng::IdGenerator;
pub use side::{Side, SideMap};
