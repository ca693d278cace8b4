//! Enemy instances.

use serde::{Deserialize, Serialize};

use super::templates::{describe_resistances, describe_weaknesses, AbilityTemplate, EnemyTier};
use crate::core::EnemyId;

/// An ability with its own cooldown counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyAbility {
    pub id: String,
    pub name: String,
    pub description: String,
    pub effect: String,
    pub damage: u32,
    pub cooldown: u32,
    /// Turns until the ability can be used again. 0 means ready.
    pub current_cooldown: u32,
}

impl EnemyAbility {
    /// A fresh copy of a template ability, ready to use.
    #[must_use]
    pub fn from_template(template: &AbilityTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            effect: template.effect.to_string(),
            damage: template.damage,
            cooldown: template.cooldown,
            current_cooldown: 0,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Use the ability, starting its cooldown. Returns its damage.
    pub fn trigger(&mut self) -> u32 {
        self.current_cooldown = self.cooldown;
        self.damage
    }

    /// Count one turn off the cooldown.
    pub fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

/// An enemy spawned for one battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    /// Tag of the template this enemy was built from.
    pub template: String,
    pub tier: EnemyTier,
    pub name: String,
    pub description: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub abilities: Vec<EnemyAbility>,
    pub weaknesses: Vec<String>,
    pub resistances: Vec<String>,
}

impl Enemy {
    #[must_use]
    pub fn is_boss(&self) -> bool {
        self.tier == EnemyTier::Boss
    }

    /// First ability whose cooldown has elapsed.
    #[must_use]
    pub fn ready_ability(&self) -> Option<&EnemyAbility> {
        self.abilities.iter().find(|a| a.is_ready())
    }

    /// Trigger the first ready ability and return it.
    pub fn use_ready_ability(&mut self) -> Option<&EnemyAbility> {
        let ability = self.abilities.iter_mut().find(|a| a.is_ready())?;
        ability.trigger();
        Some(&*ability)
    }

    /// Count one turn off every ability cooldown.
    pub fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.tick();
        }
    }

    /// Weaknesses as display text.
    #[must_use]
    pub fn weakness_description(&self) -> String {
        describe_weaknesses(&self.weaknesses)
    }

    /// Resistances as display text.
    #[must_use]
    pub fn resistance_description(&self) -> String {
        describe_resistances(&self.resistances)
    }
}
