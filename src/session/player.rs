//! Player progression, purse and holdings.

use serde::{Deserialize, Serialize};

use crate::core::PlayerConfig;
use crate::portfolio::Portfolio;

/// The player's persistent state.
///
/// Health and coins are clamped to their configured maximums. Level is
/// derived from experience.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    experience: u32,
    health: u32,
    coins: u32,
    config: PlayerConfig,
    pub portfolio: Portfolio,
}

impl PlayerState {
    #[must_use]
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            experience: 0,
            health: config.max_health,
            coins: config.starting_coins.min(config.max_coins),
            config,
            portfolio: Portfolio::new(),
        }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        match self.config.experience_per_level {
            0 => 1,
            per_level => self.experience / per_level + 1,
        }
    }

    #[must_use]
    pub fn experience(&self) -> u32 {
        self.experience
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.config.max_health
    }

    #[must_use]
    pub fn coins(&self) -> u32 {
        self.coins
    }

    #[must_use]
    pub fn max_coins(&self) -> u32 {
        self.config.max_coins
    }

    /// Add experience. Returns the number of levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        let before = self.level();
        self.experience = self.experience.saturating_add(amount);
        self.level() - before
    }

    /// Add coins up to the purse limit. Returns how many were added.
    pub fn add_coins(&mut self, amount: u32) -> u32 {
        let before = self.coins;
        self.coins = self.coins.saturating_add(amount).min(self.config.max_coins);
        self.coins - before
    }

    /// Debit coins if the purse holds enough.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.config.max_health);
    }

    pub fn heal(&mut self, amount: u32) {
        self.set_health(self.health.saturating_add(amount));
    }

    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
