//! Core engine types: ids, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

pub use config::{
    ActionCosts, ActionPointConfig, BattleConfig, EngineConfig, HandConfig, LoopConfig,
    PlayerConfig,
};
pub use error::{EngineError, Result};
pub use ids::{CardId, EnemyId};
pub use rng::{GameRng, GameRngState};
