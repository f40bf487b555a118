//! Plain-data view of the roster, as exchanged with the host.

use serde::{Deserialize, Serialize};

use crate::core::Registrant;

/// The four collections as full registrant records.
///
/// This is what the persistence collaborator stores (one record per
/// collection) and what hosts render. Squad and queue entries repeat the
/// registrant record so each collection stands on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub registrants: Vec<Registrant>,

    #[serde(default)]
    pub squad_a: Vec<Registrant>,

    #[serde(default)]
    pub squad_b: Vec<Registrant>,

    #[serde(default)]
    pub queue: Vec<Registrant>,
}

impl RosterSnapshot {
    /// True when no collection holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrants.is_empty() && self.squad_a.is_empty() && self.squad_b.is_empty() && self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegistrantId;

    #[test]
    fn test_missing_collections_default_empty() {
        let snapshot: RosterSnapshot = serde_json::from_str(r#"{"queue":[]}"#).unwrap();
        assert_eq!(snapshot, RosterSnapshot::default());
    }

    #[test]
    fn test_is_empty() {
        let mut snapshot = RosterSnapshot::default();
        assert!(snapshot.is_empty());

        snapshot.queue.push(Registrant::new(RegistrantId::from("x"), "X"));
        assert!(!snapshot.is_empty());
    }
}
