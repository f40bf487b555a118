//! Roster engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::registrant::Category;

/// Tunable parameters for allocation and rotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Queue head considered by one allocation round (default: 10).
    pub batch_size: usize,

    /// Soft cap per squad (default: 5).
    /// Also the number of players rotated out when a squad loses.
    pub squad_capacity: usize,

    /// Minimum perceived latency of allocation and squad replacement.
    /// Serialized as whole milliseconds.
    #[serde(with = "duration_millis")]
    pub busy_delay: Duration,

    /// Category given to new registrants.
    pub default_category: Category,

    /// Seed for the id generator.
    pub id_seed: u64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            squad_capacity: 5,
            busy_delay: Duration::from_millis(1000),
            default_category: Category::default(),
            id_seed: 0,
        }
    }
}

impl RosterConfig {
    /// Set the allocation batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the squad capacity.
    #[must_use]
    pub fn with_squad_capacity(mut self, capacity: usize) -> Self {
        self.squad_capacity = capacity;
        self
    }

    /// Set the busy delay.
    #[must_use]
    pub fn with_busy_delay(mut self, delay: Duration) -> Self {
        self.busy_delay = delay;
        self
    }

    /// Set the id generator seed.
    #[must_use]
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = seed;
        self
    }

    /// Set the category for new registrants.
    #[must_use]
    pub fn with_default_category(mut self, category: Category) -> Self {
        self.default_category = category;
        self
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis().min(u128::from(u64::MAX)) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
