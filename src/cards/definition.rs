//! Card definitions.
//!
//! A `Card` is one of three kinds: an asset held in the portfolio, a skill
//! that modifies the portfolio, or an event that shocks the market. Every
//! instance carries a unique `CardId` allocated by the `CardCatalog`; the
//! remaining fields never change after creation.
//!
//! ## Example
//!
//! ```
//! use wealth_guardians::cards::{AssetType, Card, CardCatalog, CardKind};
//!
//! let mut catalog = CardCatalog::new();
//! let card = catalog.create_asset_card(|c| {
//!     c.name = "Gold Bar".to_string();
//!     c.asset_type = AssetType::Gold;
//! });
//! let card = Card::from(card);
//!
//! assert_eq!(card.kind(), CardKind::Asset);
//! assert_eq!(card.name(), "Gold Bar");
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Card rarity, ordered from most to least common.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Asset classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    #[default]
    Stock,
    Bond,
    Etf,
    Gold,
    Stablecoin,
    Crypto,
    RealEstate,
    Commodity,
    Income,
}

impl AssetType {
    /// All asset classes.
    pub const ALL: [AssetType; 9] = [
        AssetType::Stock,
        AssetType::Bond,
        AssetType::Etf,
        AssetType::Gold,
        AssetType::Stablecoin,
        AssetType::Crypto,
        AssetType::RealEstate,
        AssetType::Commodity,
        AssetType::Income,
    ];

    /// Safe-haven classes that hedging strategies act on.
    #[must_use]
    pub fn is_safe_haven(self) -> bool {
        matches!(self, AssetType::Gold | AssetType::Bond)
    }
}

/// Global market state biasing asset returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    #[default]
    Stable,
    BullMarket,
    BearMarket,
    Inflation,
    Deflation,
    Crisis,
    Volatile,
}

/// Skill strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[default]
    Diversification,
    StopLoss,
    Rebalance,
    LongTerm,
    Hedge,
    Arbitrage,
    Momentum,
    Value,
}

/// When a skill takes effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillActivation {
    Immediate,
    #[default]
    OnPlay,
    OnTurnEnd,
    OnDamage,
    OnGain,
}

/// Market shocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    MarketCrash,
    BullRun,
    InflationSpike,
    InterestRateChange,
    RegulatoryChange,
    EconomicCrisis,
    TechBubble,
    Recession,
}

impl EventType {
    /// All event types.
    pub const ALL: [EventType; 8] = [
        EventType::MarketCrash,
        EventType::BullRun,
        EventType::InflationSpike,
        EventType::InterestRateChange,
        EventType::RegulatoryChange,
        EventType::EconomicCrisis,
        EventType::TechBubble,
        EventType::Recession,
    ];
}

/// When an event fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTrigger {
    #[default]
    Immediate,
    OnTurnStart,
    OnTurnEnd,
    OnCondition,
    Random,
}

/// The three card kinds; each has its own draw pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Asset,
    Skill,
    Event,
}

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Asset, CardKind::Skill, CardKind::Event];
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardKind::Asset => "asset",
            CardKind::Skill => "skill",
            CardKind::Event => "event",
        };
        f.write_str(name)
    }
}

/// An investable instrument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetCard {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    /// Purchase price per unit.
    pub cost: u32,
    pub asset_type: AssetType,
    /// Signed percentage return per period.
    pub base_return: f64,
    /// Risk level, 1 to 10.
    pub base_risk: u8,
    /// Volatility, 1 to 10.
    pub volatility: u8,
    /// Market condition this asset performs best in.
    pub preferred_market: MarketCondition,
    /// Correlation coefficients, each in `[-1, 1]`.
    pub correlations: FxHashMap<AssetType, f64>,
}

impl AssetCard {
    /// Set a correlation coefficient, clamped to `[-1, 1]`.
    pub fn set_correlation(&mut self, other: AssetType, coefficient: f64) {
        self.correlations.insert(other, coefficient.clamp(-1.0, 1.0));
    }

    /// Correlation with another asset class (0 when unspecified).
    #[must_use]
    pub fn correlation(&self, other: AssetType) -> f64 {
        self.correlations.get(&other).copied().unwrap_or(0.0)
    }
}

/// A portfolio strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillCard {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub cost: u32,
    pub skill_type: SkillType,
    pub activation: SkillActivation,
    /// Turns before the skill can be used again.
    pub cooldown: Option<u32>,
}

/// A market shock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventCard {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub cost: u32,
    pub event_type: EventType,
    pub trigger: EventTrigger,
    /// Turns the effect persists.
    pub duration: Option<u32>,
}

/// Any card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Card {
    Asset(AssetCard),
    Skill(SkillCard),
    Event(EventCard),
}

impl Card {
    #[must_use]
    pub fn id(&self) -> CardId {
        match self {
            Card::Asset(c) => c.id,
            Card::Skill(c) => c.id,
            Card::Event(c) => c.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Asset(_) => CardKind::Asset,
            Card::Skill(_) => CardKind::Skill,
            Card::Event(_) => CardKind::Event,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Card::Asset(c) => &c.name,
            Card::Skill(c) => &c.name,
            Card::Event(c) => &c.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Card::Asset(c) => &c.description,
            Card::Skill(c) => &c.description,
            Card::Event(c) => &c.description,
        }
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        match self {
            Card::Asset(c) => c.rarity,
            Card::Skill(c) => c.rarity,
            Card::Event(c) => c.rarity,
        }
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        match self {
            Card::Asset(c) => c.cost,
            Card::Skill(c) => c.cost,
            Card::Event(c) => c.cost,
        }
    }

    #[must_use]
    pub fn as_asset(&self) -> Option<&AssetCard> {
        match self {
            Card::Asset(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_skill(&self) -> Option<&SkillCard> {
        match self {
            Card::Skill(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_event(&self) -> Option<&EventCard> {
        match self {
            Card::Event(c) => Some(c),
            _ => None,
        }
    }

    /// Case-insensitive match against name or description.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name().to_lowercase().contains(needle)
            || self.description().to_lowercase().contains(needle)
    }
}

impl From<AssetCard> for Card {
    fn from(card: AssetCard) -> Self {
        Card::Asset(card)
    }
}

impl From<SkillCard> for Card {
    fn from(card: SkillCard) -> Self {
        Card::Skill(card)
    }
}

impl From<EventCard> for Card {
    fn from(card: EventCard) -> Self {
        Card::Event(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_asset() -> AssetCard {
        AssetCard {
            id: CardId::new(1),
            name: "Sample".to_string(),
            description: "A sample holding".to_string(),
            rarity: Rarity::Common,
            cost: 10,
            asset_type: AssetType::Stock,
            base_return: 5.0,
            base_risk: 5,
            volatility: 5,
            preferred_market: MarketCondition::Stable,
            correlations: FxHashMap::default(),
        }
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_correlation_clamped() {
        let mut asset = sample_asset();
        asset.set_correlation(AssetType::Gold, -3.0);
        asset.set_correlation(AssetType::Crypto, 0.6);

        assert_eq!(asset.correlation(AssetType::Gold), -1.0);
        assert_eq!(asset.correlation(AssetType::Crypto), 0.6);
        assert_eq!(asset.correlation(AssetType::Bond), 0.0);
    }

    #[test]
    fn test_card_accessors() {
        let card = Card::from(sample_asset());
        assert_eq!(card.id(), CardId::new(1));
        assert_eq!(card.kind(), CardKind::Asset);
        assert_eq!(card.cost(), 10);
        assert!(card.as_asset().is_some());
        assert!(card.as_skill().is_none());
    }

    #[test]
    fn test_search_match() {
        let card = Card::from(sample_asset());
        assert!(card.matches_lowercase("sample"));
        assert!(card.matches_lowercase("holding"));
        assert!(!card.matches_lowercase("bond"));
    }

    #[test]
    fn test_card_serialization_tagged() {
        let card = Card::from(sample_asset());
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"type\":\"asset\""));
        assert!(json.contains("\"asset_type\":\"stock\""));

        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
