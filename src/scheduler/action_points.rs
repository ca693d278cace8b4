//! Action point budget.
//!
//! Points are always in `[0, max_points]`. Spending more than is available
//! is refused without changing anything.
//!
//! ```
//! use wealth_guardians::core::ActionPointConfig;
//! use wealth_guardians::scheduler::{ActionCost, ActionPoints};
//!
//! let mut points = ActionPoints::new(&ActionPointConfig::default());
//! assert!(points.spend(ActionCost::UseSkill));
//! assert_eq!(points.current(), 3);
//! assert!(!points.use_points(4));
//! assert_eq!(points.current(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{ActionCosts, ActionPointConfig};

/// Actions with a configured point cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCost {
    PlayCard,
    UseSkill,
    Move,
    Interact,
}

/// Current points plus the rules for spending and regaining them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPoints {
    current: u32,
    max_points: u32,
    regeneration_rate: u32,
    costs: ActionCosts,
}

impl ActionPoints {
    /// A full budget.
    #[must_use]
    pub fn new(config: &ActionPointConfig) -> Self {
        Self {
            current: config.max_points,
            max_points: config.max_points,
            regeneration_rate: config.regeneration_rate,
            costs: config.costs,
        }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn max_points(&self) -> u32 {
        self.max_points
    }

    #[must_use]
    pub fn regeneration_rate(&self) -> u32 {
        self.regeneration_rate
    }

    #[must_use]
    pub fn costs(&self) -> ActionCosts {
        self.costs
    }

    /// Points an action costs.
    #[must_use]
    pub fn cost_of(&self, action: ActionCost) -> u32 {
        match action {
            ActionCost::PlayCard => self.costs.play_card,
            ActionCost::UseSkill => self.costs.use_skill,
            ActionCost::Move => self.costs.move_to,
            ActionCost::Interact => self.costs.interact,
        }
    }

    #[must_use]
    pub fn has_enough(&self, amount: u32) -> bool {
        self.current >= amount
    }

    /// Debit `amount` if available. Returns whether it was debited.
    pub fn use_points(&mut self, amount: u32) -> bool {
        if !self.has_enough(amount) {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Debit the cost of an action.
    pub fn spend(&mut self, action: ActionCost) -> bool {
        self.use_points(self.cost_of(action))
    }

    /// Add points up to the maximum. Returns how many were added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max_points);
        self.current - before
    }

    /// One regeneration step.
    pub fn regenerate(&mut self) -> u32 {
        self.restore(self.regeneration_rate)
    }

    /// Reset to the maximum.
    pub fn refill(&mut self) {
        self.current = self.max_points;
    }
}
