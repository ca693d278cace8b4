//! Identifier newtypes.
//!
//! Card and enemy ids are allocated from counters owned by the catalog and
//! the encounter generator respectively. Two instances never share a
//! counter, so ids are unique per owning instance, and tests can build
//! isolated catalogs with predictable ids.
//!
//! ```
//! use wealth_guardians::core::CardId;
//!
//! let id = CardId::new(3);
//! assert_eq!(id.to_string(), "card-3");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// Unique identifier of a spawned enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl EnemyId {
    /// Create a new enemy ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "enemy-{}", self.0)
    }
}
