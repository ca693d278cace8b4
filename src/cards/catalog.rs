//! Card catalog: id allocation and the starter card set.
//!
//! The `CardCatalog` is the only source of card ids. Each catalog owns its
//! own counter, so ids are unique within a catalog and independent between
//! catalogs.
//!
//! ## Example
//!
//! ```
//! use wealth_guardians::cards::CardCatalog;
//!
//! let mut catalog = CardCatalog::new();
//! let presets = catalog.generate_all_preset_cards();
//!
//! assert_eq!(presets.assets.len(), 7);
//! assert_eq!(presets.skills.len(), 5);
//! assert_eq!(presets.events.len(), 3);
//! assert_eq!(catalog.issued(), 15);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{
    AssetCard, AssetType, Card, EventCard, EventTrigger, EventType, MarketCondition, Rarity,
    SkillActivation, SkillCard, SkillType,
};
use crate::core::CardId;

/// The starter card set, split by kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCards {
    pub assets: Vec<AssetCard>,
    pub skills: Vec<SkillCard>,
    pub events: Vec<EventCard>,
}

impl PresetCards {
    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len() + self.skills.len() + self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a single list of cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.assets
            .into_iter()
            .map(Card::from)
            .chain(self.skills.into_iter().map(Card::from))
            .chain(self.events.into_iter().map(Card::from))
            .collect()
    }
}

/// Factory for card instances.
///
/// `create_*` methods start from a kind-specific default, let the caller
/// override any fields, then stamp a fresh id. Overrides cannot choose the
/// id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardCatalog {
    next_id: u32,
}

impl CardCatalog {
    /// Create a catalog whose first id is `card-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids issued so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        self.next_id
    }

    fn allocate(&mut self) -> CardId {
        self.next_id += 1;
        CardId::new(self.next_id)
    }

    /// Create an asset card from the default template.
    ///
    /// Risk and volatility are clamped to `1..=10`, correlations to `[-1, 1]`.
    pub fn create_asset_card(&mut self, overrides: impl FnOnce(&mut AssetCard)) -> AssetCard {
        let mut card = AssetCard {
            id: CardId::new(0),
            name: "Unknown Asset".to_string(),
            description: "An asset card".to_string(),
            rarity: Rarity::Common,
            cost: 10,
            asset_type: AssetType::Stock,
            base_return: 5.0,
            base_risk: 5,
            volatility: 5,
            preferred_market: MarketCondition::Stable,
            correlations: FxHashMap::default(),
        };
        overrides(&mut card);
        card.base_risk = card.base_risk.clamp(1, 10);
        card.volatility = card.volatility.clamp(1, 10);
        for coefficient in card.correlations.values_mut() {
            *coefficient = coefficient.clamp(-1.0, 1.0);
        }
        card.id = self.allocate();
        card
    }

    /// Create a skill card from the default template.
    pub fn create_skill_card(&mut self, overrides: impl FnOnce(&mut SkillCard)) -> SkillCard {
        let mut card = SkillCard {
            id: CardId::new(0),
            name: "Unknown Skill".to_string(),
            description: "A skill card".to_string(),
            rarity: Rarity::Common,
            cost: 15,
            skill_type: SkillType::Diversification,
            activation: SkillActivation::OnPlay,
            cooldown: None,
        };
        overrides(&mut card);
        card.id = self.allocate();
        card
    }

    /// Create an event card from the default template.
    pub fn create_event_card(&mut self, overrides: impl FnOnce(&mut EventCard)) -> EventCard {
        let mut card = EventCard {
            id: CardId::new(0),
            name: "Unknown Event".to_string(),
            description: "An event card".to_string(),
            rarity: Rarity::Common,
            cost: 0,
            event_type: EventType::MarketCrash,
            trigger: EventTrigger::Immediate,
            duration: None,
        };
        overrides(&mut card);
        card.id = self.allocate();
        card
    }

    /// The seven starter assets.
    pub fn preset_asset_cards(&mut self) -> Vec<AssetCard> {
        #[allow(clippy::type_complexity)]
        let presets: [(&str, &str, Rarity, u32, AssetType, f64, u8, u8, MarketCondition, [(AssetType, f64); 2]); 7] = [
            (
                "Tech Stock",
                "High-growth technology shares. High return, high risk.",
                Rarity::Uncommon, 40, AssetType::Stock, 8.5, 7, 8, MarketCondition::BullMarket,
                [(AssetType::Crypto, 0.6), (AssetType::Gold, -0.3)],
            ),
            (
                "Blue Chip",
                "Shares of large established companies. Moderate return and risk.",
                Rarity::Common, 35, AssetType::Stock, 6.0, 5, 6, MarketCondition::Stable,
                [(AssetType::Bond, -0.2), (AssetType::Etf, 0.8)],
            ),
            (
                "Government Bond",
                "Low-risk sovereign debt with steady income.",
                Rarity::Common, 15, AssetType::Bond, 3.2, 2, 2, MarketCondition::Stable,
                [(AssetType::Stock, -0.2), (AssetType::Gold, 0.1)],
            ),
            (
                "Index ETF",
                "Tracks a market index to spread risk.",
                Rarity::Common, 25, AssetType::Etf, 7.0, 4, 5, MarketCondition::Stable,
                [(AssetType::Stock, 0.8), (AssetType::Bond, -0.1)],
            ),
            (
                "Gold",
                "Safe-haven metal that shines in a crisis.",
                Rarity::Uncommon, 30, AssetType::Gold, 4.5, 3, 4, MarketCondition::Crisis,
                [(AssetType::Stock, -0.3), (AssetType::Crypto, 0.2)],
            ),
            (
                "Stablecoin",
                "A digital currency pegged to a stable value.",
                Rarity::Common, 10, AssetType::Stablecoin, 2.0, 1, 1, MarketCondition::Stable,
                [(AssetType::Stock, 0.0), (AssetType::Bond, 0.0)],
            ),
            (
                "Bitcoin",
                "High-risk, high-reward crypto asset.",
                Rarity::Rare, 60, AssetType::Crypto, 12.0, 9, 10, MarketCondition::Volatile,
                [(AssetType::Stock, 0.6), (AssetType::Gold, 0.2)],
            ),
        ];

        presets
            .into_iter()
            .map(|(name, description, rarity, cost, asset_type, base_return, base_risk, volatility, market, correlations)| {
                self.create_asset_card(|c| {
                    c.name = name.to_string();
                    c.description = description.to_string();
                    c.rarity = rarity;
                    c.cost = cost;
                    c.asset_type = asset_type;
                    c.base_return = base_return;
                    c.base_risk = base_risk;
                    c.volatility = volatility;
                    c.preferred_market = market;
                    c.correlations = correlations.into_iter().collect();
                })
            })
            .collect()
    }

    /// The five starter skills.
    pub fn preset_skill_cards(&mut self) -> Vec<SkillCard> {
        let presets = [
            (
                "Diversification",
                "Spread holdings across asset classes to lower concentration.",
                Rarity::Common, 20, SkillType::Diversification, SkillActivation::OnPlay,
            ),
            (
                "Stop Loss",
                "Cut losses early to keep risk under control.",
                Rarity::Uncommon, 25, SkillType::StopLoss, SkillActivation::OnDamage,
            ),
            (
                "Rebalance",
                "Shift allocations back toward the target mix.",
                Rarity::Common, 15, SkillType::Rebalance, SkillActivation::OnTurnEnd,
            ),
            (
                "Long-Term Hold",
                "Stay invested and let returns compound.",
                Rarity::Uncommon, 30, SkillType::LongTerm, SkillActivation::OnTurnEnd,
            ),
            (
                "Hedge",
                "Offset risk with safe-haven holdings.",
                Rarity::Rare, 35, SkillType::Hedge, SkillActivation::OnPlay,
            ),
        ];

        presets
            .into_iter()
            .map(|(name, description, rarity, cost, skill_type, activation)| {
                self.create_skill_card(|c| {
                    c.name = name.to_string();
                    c.description = description.to_string();
                    c.rarity = rarity;
                    c.cost = cost;
                    c.skill_type = skill_type;
                    c.activation = activation;
                })
            })
            .collect()
    }

    /// The three starter events.
    pub fn preset_event_cards(&mut self) -> Vec<EventCard> {
        let presets = [
            (
                "Bull Run",
                "Investor euphoria lifts equity returns.",
                Rarity::Uncommon, EventType::BullRun, 3,
            ),
            (
                "Financial Crisis",
                "Panic selling hammers risky assets.",
                Rarity::Rare, EventType::EconomicCrisis, 2,
            ),
            (
                "Inflation Spike",
                "Rising prices erode the value of cash.",
                Rarity::Uncommon, EventType::InflationSpike, 2,
            ),
        ];

        presets
            .into_iter()
            .map(|(name, description, rarity, event_type, duration)| {
                self.create_event_card(|c| {
                    c.name = name.to_string();
                    c.description = description.to_string();
                    c.rarity = rarity;
                    c.event_type = event_type;
                    c.trigger = EventTrigger::OnTurnStart;
                    c.duration = Some(duration);
                })
            })
            .collect()
    }

    /// Generate a fresh copy of the full starter set.
    pub fn generate_all_preset_cards(&mut self) -> PresetCards {
        PresetCards {
            assets: self.preset_asset_cards(),
            skills: self.preset_skill_cards(),
            events: self.preset_event_cards(),
        }
    }
}
