//! Registrant identification and records.
//!
//! Every person in the pool has a unique `RegistrantId`. Ids are opaque
//! strings: the engine never parses them, it only compares and hashes them.
//! Hosts restoring persisted data keep whatever ids they stored; new ids come
//! from [`IdGenerator`](super::IdGenerator).
//!
//! ## Usage
//!
//! ```
//! use pickup_roster::core::{Category, Registrant, RegistrantId};
//!
//! let ana = Registrant::new(RegistrantId::from("r-1"), "Ana");
//!
//! assert_eq!(ana.goals, 0);
//! assert_eq!(ana.category, Category::default());
//! assert_eq!(ana.category.as_str(), "S");
//! ```

use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a registrant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrantId(String);

impl RegistrantId {
    /// Create an id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegistrantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for RegistrantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RegistrantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Skill/category tag used to balance squads.
///
/// Allocation splits each category evenly between the squads. Hosts
/// currently register everyone under the default tag `"S"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// The tag given to new registrants.
    pub const DEFAULT: &'static str = "S";

    /// Create a category tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person registered in the pool of potential players.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Registrant {
    pub id: RegistrantId,

    /// Display name, always trimmed and non-empty.
    pub name: String,

    /// Goals scored this session.
    #[serde(default)]
    pub goals: u32,

    #[serde(default)]
    pub category: Category,
}

impl Registrant {
    /// Create a registrant with zero goals in the default category.
    #[must_use]
    pub fn new(id: RegistrantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            goals: 0,
            category: Category::default(),
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the goal counter.
    #[must_use]
    pub fn with_goals(mut self, goals: u32) -> Self {
        self.goals = goals;
        self
    }

    /// Add one goal.
    pub fn score(&mut self) {
        self.goals = self.goals.saturating_add(1);
    }

    /// Remove one goal, never going below zero.
    pub fn unscore(&mut self) {
        self.goals = self.goals.saturating_sub(1);
    }
}

/// Trim a candidate name, rejecting blank ones.
pub(crate) fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
