//! Card effect resolution.
//!
//! - `market`: Fixed market-modifier and event-impact tables
//! - `CardEffectResolver`: Asset returns, skill and event application,
//!   risk and diversification scoring
//!
//! ## Design Philosophy
//!
//! Resolution is snapshot in, snapshot out. The resolver never mutates the
//! caller's portfolio, and every card produces at least one log line, so a
//! presentation layer can show what happened even when nothing changed.

pub mod market;
mod resolver;

pub use market::{event_impact, market_modifier, EventImpact, MarketModifier};
pub use resolver::{CardEffectResolver, EventOutcome, SkillOutcome};
