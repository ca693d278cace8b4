//! Engine configuration types.
//!
//! Sessions are configured at startup by providing:
//! - `HandConfig`: Hand composition (asset and skill slots)
//! - `LoopConfig`: Phase clock, regeneration and battle-end timing
//! - `ActionPointConfig`: Action point budget and per-action costs
//! - `BattleConfig`: Battle health pool and victory rewards
//! - `PlayerConfig`: Starting purse, health and levelling curve
//! - `EngineConfig`: Combines all configuration plus the RNG seed
//!
//! Every struct has a `Default` matching the reference game balance.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of cards of each kind dealt per hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandConfig {
    /// Asset cards per hand.
    pub asset_slots: usize,
    /// Skill cards per hand.
    pub skill_slots: usize,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            asset_slots: 3,
            skill_slots: 2,
        }
    }
}

impl HandConfig {
    /// Total hand capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.asset_slots + self.skill_slots
    }
}

/// Timing of the cooperative game loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Seconds each phase lasts before it times out.
    pub phase_duration_secs: u32,

    /// Advance automatically when the phase clock reaches zero.
    pub auto_advance: bool,

    /// Period of the phase clock.
    pub phase_tick: Duration,

    /// Period of action point regeneration.
    pub regen_interval: Duration,

    /// Delay between a battle victory and the battle closing.
    pub victory_delay: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            phase_duration_secs: 30,
            auto_advance: false,
            phase_tick: Duration::from_secs(1),
            regen_interval: Duration::from_secs(5),
            victory_delay: Duration::from_secs(3),
        }
    }
}

impl LoopConfig {
    /// Set the phase duration.
    #[must_use]
    pub fn with_phase_duration(mut self, secs: u32) -> Self {
        self.phase_duration_secs = secs;
        self
    }

    /// Enable or disable auto-advance.
    #[must_use]
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Set the regeneration interval.
    #[must_use]
    pub fn with_regen_interval(mut self, interval: Duration) -> Self {
        self.regen_interval = interval;
        self
    }

    /// Set the victory delay.
    #[must_use]
    pub fn with_victory_delay(mut self, delay: Duration) -> Self {
        self.victory_delay = delay;
        self
    }
}

/// Per-action point costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCosts {
    pub play_card: u32,
    pub use_skill: u32,
    pub move_to: u32,
    pub interact: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            play_card: 1,
            use_skill: 2,
            move_to: 1,
            interact: 1,
        }
    }
}

/// Action point budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPointConfig {
    /// Upper bound and per-turn refill.
    pub max_points: u32,
    /// Points restored per regeneration tick.
    pub regeneration_rate: u32,
    /// Cost table.
    pub costs: ActionCosts,
}

impl Default for ActionPointConfig {
    fn default() -> Self {
        Self {
            max_points: 5,
            regeneration_rate: 1,
            costs: ActionCosts::default(),
        }
    }
}

impl ActionPointConfig {
    /// Set the maximum points.
    #[must_use]
    pub fn with_max_points(mut self, max: u32) -> Self {
        self.max_points = max;
        self
    }

    /// Set the regeneration rate.
    #[must_use]
    pub fn with_regeneration_rate(mut self, rate: u32) -> Self {
        self.regeneration_rate = rate;
        self
    }
}

/// Battle balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Player health at battle start.
    pub player_max_health: u32,
    /// Coins awarded per enemy level on victory.
    pub coins_per_level: u32,
    /// Experience awarded per enemy level on victory.
    pub experience_per_level: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_max_health: 100,
            coins_per_level: 10,
            experience_per_level: 5,
        }
    }
}

/// Player progression and purse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub starting_coins: u32,
    pub max_coins: u32,
    pub max_health: u32,
    /// Experience needed per level.
    pub experience_per_level: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_coins: 200,
            max_coins: 200,
            max_health: 100,
            experience_per_level: 100,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub hand: HandConfig,
    pub game_loop: LoopConfig,
    pub action_points: ActionPointConfig,
    pub battle: BattleConfig,
    pub player: PlayerConfig,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed for reproducible sessions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the loop timing.
    #[must_use]
    pub fn with_loop(mut self, game_loop: LoopConfig) -> Self {
        self.game_loop = game_loop;
        self
    }

    /// Replace the action point budget.
    #[must_use]
    pub fn with_action_points(mut self, action_points: ActionPointConfig) -> Self {
        self.action_points = action_points;
        self
    }

    /// Replace the player configuration.
    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.player = player;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new();

        assert_eq!(config.seed, None);
        assert_eq!(config.hand.capacity(), 5);
        assert_eq!(config.game_loop.phase_duration_secs, 30);
        assert!(!config.game_loop.auto_advance);
        assert_eq!(config.game_loop.regen_interval, Duration::from_secs(5));
        assert_eq!(config.action_points.max_points, 5);
        assert_eq!(config.action_points.costs.use_skill, 2);
        assert_eq!(config.battle.player_max_health, 100);
        assert_eq!(config.player.starting_coins, 200);
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::new()
            .with_seed(7)
            .with_loop(LoopConfig::default().with_phase_duration(10).with_auto_advance(true))
            .with_action_points(ActionPointConfig::default().with_max_points(8));

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.game_loop.phase_duration_secs, 10);
        assert!(config.game_loop.auto_advance);
        assert_eq!(config.action_points.max_points, 8);
    }

    #[test]
    fn test_config_serde() {
        let config = EngineConfig::new().with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
