//! Battle sub-state.
//!
//! A battle pits the player against one `Enemy`. Player actions are a
//! closed set (`BattleAction`); each variant carries only what it needs.
//! `BattleState` holds health pools, the round counter and the action log;
//! the scheduler decides when a battle starts and ends.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{BattleConfig, CardId};
use crate::encounter::Enemy;

/// A player action in battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleAction {
    /// Deal damage, reduced by the enemy's defense to a minimum of 1.
    Attack {
        damage: u32,
        card_id: Option<CardId>,
    },
    /// Recover one action point.
    Defend,
    /// Use a skill, healing if it carries a healing amount.
    Skill {
        healing: Option<u32>,
        card_id: Option<CardId>,
    },
    /// Use an item, healing if it carries a healing amount.
    Item { healing: Option<u32> },
}

/// Who acted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actor", rename_all = "snake_case")]
pub enum BattleActor {
    Player { action: BattleAction },
    /// `ability` is `None` for a basic attack.
    Enemy { ability: Option<String> },
}

/// One line of the battle log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub round: u32,
    pub actor: BattleActor,
    pub damage: u32,
    pub healing: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Coins,
    Experience,
}

/// A reward granted on victory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReward {
    pub kind: RewardKind,
    pub amount: u32,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Battle snapshot.
///
/// `is_in_battle()` is derived from `enemy`, so the two can never
/// disagree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub enemy: Option<Enemy>,
    pub round: u32,
    pub player_health: u32,
    pub player_max_health: u32,
    pub enemy_health: u32,
    pub log: Vector<BattleLogEntry>,
    pub rewards: Vec<BattleReward>,
    /// Set once the battle is decided.
    pub outcome: Option<BattleOutcome>,
}

impl BattleState {
    /// No battle in progress.
    #[must_use]
    pub fn idle(player_max_health: u32) -> Self {
        Self {
            enemy: None,
            round: 0,
            player_health: player_max_health,
            player_max_health,
            enemy_health: 0,
            log: Vector::new(),
            rewards: Vec::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn is_in_battle(&self) -> bool {
        self.enemy.is_some()
    }

    /// Whether actions can still change the result.
    #[must_use]
    pub fn is_undecided(&self) -> bool {
        self.is_in_battle() && self.outcome.is_none()
    }

    pub(crate) fn begin(&mut self, enemy: Enemy, player_max_health: u32) {
        self.round = 1;
        self.player_health = player_max_health;
        self.player_max_health = player_max_health;
        self.enemy_health = enemy.max_health;
        self.log.clear();
        self.rewards.clear();
        self.outcome = None;
        self.enemy = Some(enemy);
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::idle(self.player_max_health);
    }

    fn set_enemy_health(&mut self, health: u32) {
        self.enemy_health = health;
        if let Some(enemy) = self.enemy.as_mut() {
            enemy.health = health;
        }
    }

    fn heal(&mut self, amount: u32) -> u32 {
        let before = self.player_health;
        self.player_health = self
            .player_health
            .saturating_add(amount)
            .min(self.player_max_health);
        self.player_health - before
    }

    /// Apply a player action to the health pools and log it.
    ///
    /// Returns the log entry. Action point effects are the caller's job.
    pub(crate) fn apply_player_action(&mut self, action: BattleAction) -> BattleLogEntry {
        let defense = self.enemy.as_ref().map_or(0, |e| e.defense);
        let (damage, healing) = match &action {
            BattleAction::Attack { damage, .. } => {
                let dealt = damage.saturating_sub(defense).max(1);
                self.set_enemy_health(self.enemy_health.saturating_sub(dealt));
                (dealt, 0)
            }
            BattleAction::Defend => (0, 0),
            BattleAction::Skill { healing, .. } | BattleAction::Item { healing } => {
                (0, healing.map_or(0, |h| self.heal(h)))
            }
        };

        let entry = BattleLogEntry {
            round: self.round,
            actor: BattleActor::Player { action },
            damage,
            healing,
        };
        self.log.push_back(entry.clone());
        entry
    }

    /// Resolve one enemy turn: first ready ability, else a basic attack.
    pub(crate) fn enemy_strike(&mut self) -> Option<BattleLogEntry> {
        let enemy = self.enemy.as_mut()?;
        let (ability, damage) = match enemy.use_ready_ability() {
            Some(ability) => (Some(ability.name.clone()), ability.damage),
            None => (None, enemy.attack),
        };
        enemy.tick_cooldowns();

        self.player_health = self.player_health.saturating_sub(damage);
        let entry = BattleLogEntry {
            round: self.round,
            actor: BattleActor::Enemy { ability },
            damage,
            healing: 0,
        };
        self.log.push_back(entry.clone());
        self.round += 1;
        Some(entry)
    }

    /// Decide the battle if either side is out of health.
    pub(crate) fn check_outcome(&self) -> Option<BattleOutcome> {
        if !self.is_in_battle() {
            return None;
        }
        if self.enemy_health == 0 {
            Some(BattleOutcome::Victory)
        } else if self.player_health == 0 {
            Some(BattleOutcome::Defeat)
        } else {
            None
        }
    }

    /// Rewards for beating the current enemy.
    pub(crate) fn victory_rewards(&self, config: &BattleConfig) -> Vec<BattleReward> {
        let Some(enemy) = self.enemy.as_ref() else {
            return Vec::new();
        };
        vec![
            BattleReward {
                kind: RewardKind::Coins,
                amount: config.coins_per_level * enemy.level,
                description: format!("Coins for defeating {}", enemy.name),
            },
            BattleReward {
                kind: RewardKind::Experience,
                amount: config.experience_per_level * enemy.level,
                description: "Experience gained".to_string(),
            },
        ]
    }
}
