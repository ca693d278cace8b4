//! Enemy template table and tag descriptions.
//!
//! Templates are static data. Instantiating an enemy copies the template's
//! abilities with fresh cooldowns, so templates are never mutated.

use crate::core::{EngineError, Result};

/// Whether a template is a regular foe or a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTier {
    Normal,
    Boss,
}

/// Static description of an enemy ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: &'static str,
    pub damage: u32,
    pub cooldown: u32,
}

/// Static description of an enemy type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub tag: &'static str,
    pub tier: EnemyTier,
    pub name: &'static str,
    pub description: &'static str,
    pub weaknesses: &'static [&'static str],
    pub resistances: &'static [&'static str],
    pub abilities: &'static [AbilityTemplate],
}

pub(crate) static TEMPLATES: [EnemyTemplate; 5] = [
    EnemyTemplate {
        tag: "market_volatility",
        tier: EnemyTier::Normal,
        name: "Market Volatility",
        description: "The uncertainty of markets in motion",
        weaknesses: &["diversification", "long_term"],
        resistances: &["short_term"],
        abilities: &[AbilityTemplate {
            id: "volatility_attack",
            name: "Volatility Shock",
            description: "Deals unpredictable damage",
            effect: "random_damage",
            damage: 15,
            cooldown: 2,
        }],
    },
    EnemyTemplate {
        tag: "inflation",
        tier: EnemyTier::Normal,
        name: "Inflation",
        description: "The slow threat of a shrinking currency",
        weaknesses: &["inflation_protection", "real_assets"],
        resistances: &["cash"],
        abilities: &[AbilityTemplate {
            id: "inflation_drain",
            name: "Inflation Drain",
            description: "Deals damage every turn",
            effect: "dot_damage",
            damage: 8,
            cooldown: 1,
        }],
    },
    EnemyTemplate {
        tag: "recession",
        tier: EnemyTier::Normal,
        name: "Recession",
        description: "Systemic risk from a shrinking economy",
        weaknesses: &["defensive_stocks", "bonds"],
        resistances: &["cyclical_stocks"],
        abilities: &[AbilityTemplate {
            id: "recession_impact",
            name: "Recession Impact",
            description: "Heavily weakens the player",
            effect: "debuff",
            damage: 20,
            cooldown: 3,
        }],
    },
    EnemyTemplate {
        tag: "financial_crisis",
        tier: EnemyTier::Boss,
        name: "Financial Crisis",
        description: "The most dangerous foe; it takes several strategies to beat",
        weaknesses: &["diversification", "hedge", "long_term"],
        resistances: &["single_asset", "leverage"],
        abilities: &[
            AbilityTemplate {
                id: "crisis_wave",
                name: "Crisis Wave",
                description: "Heavy damage that also lowers defense",
                effect: "heavy_damage_debuff",
                damage: 30,
                cooldown: 2,
            },
            AbilityTemplate {
                id: "panic_spread",
                name: "Panic Spread",
                description: "Deals damage every turn",
                effect: "continuous_damage",
                damage: 12,
                cooldown: 1,
            },
        ],
    },
    EnemyTemplate {
        tag: "market_crash",
        tier: EnemyTier::Boss,
        name: "Market Crash",
        description: "A sudden collapse that demands a quick response",
        weaknesses: &["stop_loss", "defensive_position"],
        resistances: &["aggressive_growth"],
        abilities: &[
            AbilityTemplate {
                id: "crash_impact",
                name: "Crash Impact",
                description: "Deals massive damage",
                effect: "massive_damage",
                damage: 40,
                cooldown: 4,
            },
            AbilityTemplate {
                id: "fear_aura",
                name: "Fear Aura",
                description: "Lowers the player's attack",
                effect: "attack_debuff",
                damage: 0,
                cooldown: 2,
            },
        ],
    },
];

/// Every template tag, normal templates first.
pub fn template_tags() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|t| t.tag)
}

/// Find a template by tag.
#[must_use]
pub fn template(tag: &str) -> Option<&'static EnemyTemplate> {
    TEMPLATES.iter().find(|t| t.tag == tag)
}

/// Find a template by tag, failing on unknown tags.
pub fn lookup(tag: &str) -> Result<&'static EnemyTemplate> {
    template(tag).ok_or_else(|| EngineError::UnknownEnemyTemplate(tag.to_string()))
}

/// Templates of one tier, in table order.
pub fn templates_of(tier: EnemyTier) -> impl Iterator<Item = &'static EnemyTemplate> {
    TEMPLATES.iter().filter(move |t| t.tier == tier)
}

/// Display label for a weakness tag. Unknown tags pass through.
#[must_use]
pub fn weakness_label(tag: &str) -> &str {
    match tag {
        "diversification" => "Diversified investing",
        "long_term" => "Long-term holding",
        "inflation_protection" => "Inflation protection",
        "real_assets" => "Real assets",
        "defensive_stocks" => "Defensive stocks",
        "bonds" => "Bond investing",
        "stop_loss" => "Stop-loss strategy",
        "defensive_position" => "Defensive positioning",
        "hedge" => "Hedging strategy",
        other => other,
    }
}

/// Display label for a resistance tag. Unknown tags pass through.
#[must_use]
pub fn resistance_label(tag: &str) -> &str {
    match tag {
        "short_term" => "Short-term trading",
        "cash" => "Holding cash",
        "cyclical_stocks" => "Cyclical stocks",
        "single_asset" => "Single-asset bets",
        "leverage" => "Leverage",
        "aggressive_growth" => "Aggressive growth",
        other => other,
    }
}

/// Comma-separated weakness labels.
#[must_use]
pub fn describe_weaknesses<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| weakness_label(t.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-separated resistance labels.
#[must_use]
pub fn describe_resistances<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| resistance_label(t.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(template_tags().count(), 5);
        assert_eq!(templates_of(EnemyTier::Normal).count(), 3);
        assert_eq!(templates_of(EnemyTier::Boss).count(), 2);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(template("inflation").unwrap().abilities[0].damage, 8);
        assert!(template("dragon").is_none());
        assert!(matches!(lookup("dragon"), Err(EngineError::UnknownEnemyTemplate(t)) if t == "dragon"));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            describe_weaknesses(&["diversification", "hedge"]),
            "Diversified investing, Hedging strategy"
        );
        assert_eq!(describe_resistances(&["leverage", "mystery"]), "Leverage, mystery");
        assert_eq!(describe_weaknesses::<&str>(&[]), "");
    }
}
