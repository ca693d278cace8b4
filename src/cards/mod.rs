//! Card system: definitions and the catalog that mints them.
//!
//! ## Key Types
//!
//! - `Card`: Tagged union of `AssetCard`, `SkillCard` and `EventCard`
//! - `CardKind`: Which draw pile a card belongs to
//! - `CardCatalog`: Id allocation plus the starter card set
//! - `MarketCondition`: Global market state read by the effect resolver

pub mod catalog;
pub mod definition;

pub use catalog::{CardCatalog, PresetCards};
pub use definition::{
    AssetCard, AssetType, Card, CardKind, EventCard, EventTrigger, EventType, MarketCondition,
    Rarity, SkillActivation, SkillCard, SkillType,
};
