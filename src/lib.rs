//! # wealth-guardians
//!
//! A card-driven investment simulation engine.
//!
//! Players build a portfolio from randomly drawn asset, skill and event
//! cards. A seeded resolution layer turns card plays and market conditions
//! into portfolio value changes, risk and diversification scores, and a
//! timed turn scheduler gates play by an action point budget and embeds a
//! battle sub-state.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: Resolution borrows a portfolio and
//!    returns a new one plus log lines. Callers commit what they keep.
//!
//! 2. **Nothing Is Fatal**: Exhaustion yields partial results, shortfalls
//!    are `bool` refusals, inapplicable effects are log lines. Only
//!    invalid references and undecodable saves are errors.
//!
//! 3. **Explicit Time**: Timers are owned values advanced by `tick`. No
//!    background threads.
//!
//! ## Architecture
//!
//! - **Seeded Streams**: One master seed, split into independent per-purpose
//!   RNG streams (deck, market, encounter).
//!
//! - **Persistent Data Structures**: O(1) portfolio and battle log clones
//!   via `im`.
//!
//! ## Modules
//!
//! - `core`: Ids, RNG, configuration, errors
//! - `cards`: Card definitions and the catalog
//! - `deck`: Piles, hand drawing, reshuffles and the hand guarantee
//! - `portfolio`: Positions, purchases, sales and return resolution
//! - `effects`: Asset returns, skill and event effects, scores
//! - `encounter`: Enemy templates and level-scaled generation
//! - `scheduler`: Phases, action points, timers and battles
//! - `session`: The composition root and save games

pub mod cards;
pub mod core;
pub mod deck;
pub mod effects;
pub mod encounter;
pub mod portfolio;
pub mod scheduler;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardId, EnemyId, EngineConfig, EngineError, GameRng, GameRngState, HandConfig, LoopConfig,
    Result,
};

pub use crate::cards::{
    AssetCard, AssetType, Card, CardCatalog, CardKind, EventCard, EventType, MarketCondition,
    SkillCard, SkillType,
};

pub use crate::deck::{DeckManager, DeckStatus, Hand};

pub use crate::portfolio::{Portfolio, PortfolioAsset};

pub use crate::effects::{CardEffectResolver, EventOutcome, SkillOutcome};

pub use crate::encounter::{EncounterGenerator, Enemy, EnemyAbility};

pub use crate::scheduler::{
    ActionCost, ActionPoints, BattleAction, BattleOutcome, BattleState, GameLoopState, GamePhase,
    LoopEvent, TurnScheduler, TurnState,
};

pub use crate::session::{GameSession, PlayerState, RngStreams, SaveGame};
