//! Turn, phase and battle scheduling.
//!
//! ## Key Types
//!
//! - `GamePhase`: The six-phase turn cycle
//! - `ActionPoints`: Bounded point budget with per-action costs
//! - `PeriodicTimer`: Tick-driven periodic timer
//! - `BattleState`: Battle sub-state and log
//! - `TurnScheduler`: Owns all of the above and emits `LoopEvent`s
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use wealth_guardians::core::{EngineConfig, LoopConfig};
//! use wealth_guardians::scheduler::{GamePhase, LoopEvent, TurnScheduler};
//!
//! let config = EngineConfig::default()
//!     .with_loop(LoopConfig::default().with_phase_duration(2).with_auto_advance(true));
//! let mut scheduler = TurnScheduler::from_config(&config);
//! scheduler.start();
//!
//! scheduler.tick(Duration::from_secs(2));
//! assert_eq!(scheduler.phase(), GamePhase::Draw);
//! assert_eq!(
//!     scheduler.drain_events(),
//!     vec![LoopEvent::PhaseEntered { phase: GamePhase::Draw }]
//! );
//! ```

pub mod action_points;
pub mod battle;
pub mod phase;
pub mod timer;
mod turn;

pub use action_points::{ActionCost, ActionPoints};
pub use battle::{
    BattleAction, BattleActor, BattleLogEntry, BattleOutcome, BattleReward, BattleState,
    RewardKind,
};
pub use phase::GamePhase;
pub use timer::PeriodicTimer;
pub use turn::{GameLoopState, LoopEvent, TurnScheduler, TurnState};
