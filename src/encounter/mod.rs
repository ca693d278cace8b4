//! Enemy and encounter generation.
//!
//! ## Key Types
//!
//! - `EnemyTemplate`: Static template data (name, tags, abilities)
//! - `Enemy`: A spawned enemy with level-scaled stats
//! - `EncounterGenerator`: Spawns normal enemies and bosses
//!
//! ## Example
//!
//! ```
//! use wealth_guardians::core::GameRng;
//! use wealth_guardians::encounter::EncounterGenerator;
//!
//! let mut encounters = EncounterGenerator::new(GameRng::new(1));
//!
//! let boss = encounters.for_level(5);
//! assert!(boss.is_boss());
//! assert_eq!(boss.max_health, 225);
//! ```

pub mod enemy;
pub mod generator;
pub mod templates;

pub use enemy::{Enemy, EnemyAbility};
pub use generator::{EncounterGenerator, EnemyStats};
pub use templates::{
    describe_resistances, describe_weaknesses, template, template_tags, AbilityTemplate,
    EnemyTemplate, EnemyTier,
};
