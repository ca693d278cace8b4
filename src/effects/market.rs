//! Market lookup tables.
//!
//! Two fixed tables drive the resolver:
//! - the market modifier applied to an asset's base return under each
//!   market condition, and
//! - the impact of each event type: per-class return multipliers plus the
//!   market condition the event leaves behind.

use crate::cards::{AssetCard, AssetType, EventType, MarketCondition};

/// Spread of the volatile-market modifier at volatility 10.
pub const VOLATILE_MARKET_SPREAD: f64 = 0.4;

/// Spread of the per-call jitter at volatility 10.
pub const JITTER_SPREAD: f64 = 0.2;

/// How a market condition scales an asset's return.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarketModifier {
    /// A fixed factor.
    Fixed(f64),
    /// A factor drawn uniformly from `1 ± width / 2`.
    Random { width: f64 },
}

/// Full width of a uniform factor around 1 for an asset's volatility.
#[must_use]
pub fn volatility_width(volatility: u8, spread: f64) -> f64 {
    f64::from(volatility) / 10.0 * spread
}

/// Look up the modifier for an asset under a market condition.
#[must_use]
pub fn market_modifier(market: MarketCondition, asset: &AssetCard) -> MarketModifier {
    use AssetType::*;

    let factor = match (market, asset.asset_type) {
        (MarketCondition::BullMarket, Stock | Crypto) => 1.3,
        (MarketCondition::BearMarket, Stock | Crypto) => 0.7,
        (MarketCondition::BearMarket, Bond | Stablecoin) => 1.1,
        (MarketCondition::Crisis, Gold) => 1.5,
        (MarketCondition::Crisis, Crypto) => 0.5,
        (MarketCondition::Inflation, Gold | RealEstate) => 1.2,
        (MarketCondition::Inflation, Bond | Stablecoin) => 0.8,
        (MarketCondition::Volatile, _) => {
            return MarketModifier::Random {
                width: volatility_width(asset.volatility, VOLATILE_MARKET_SPREAD),
            }
        }
        _ => 1.0,
    };
    MarketModifier::Fixed(factor)
}

/// The effect of an event card on the market.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventImpact {
    /// Return multipliers per asset class. Classes not listed are unchanged.
    pub multipliers: &'static [(AssetType, f64)],
    /// The market condition after the event.
    pub market: MarketCondition,
    /// Log line describing the event.
    pub headline: &'static str,
}

impl EventImpact {
    /// Multiplier for a class, 1.0 if unaffected.
    #[must_use]
    pub fn multiplier(&self, asset_type: AssetType) -> f64 {
        self.multipliers
            .iter()
            .find(|(t, _)| *t == asset_type)
            .map_or(1.0, |(_, m)| *m)
    }
}

/// Look up the impact of an event type.
#[must_use]
pub fn event_impact(event: EventType) -> EventImpact {
    use AssetType::*;

    match event {
        EventType::BullRun => EventImpact {
            multipliers: &[(Stock, 1.5), (Etf, 1.5)],
            market: MarketCondition::BullMarket,
            headline: "Bull run! Stock and ETF returns up 50%",
        },
        EventType::EconomicCrisis => EventImpact {
            multipliers: &[(Crypto, 0.6), (Stock, 0.6), (Gold, 1.3), (Bond, 1.3)],
            market: MarketCondition::Crisis,
            headline: "Financial crisis! Risky assets fall while safe havens rise",
        },
        EventType::InflationSpike => EventImpact {
            multipliers: &[(Stablecoin, 0.8), (Bond, 0.8), (Gold, 1.4), (RealEstate, 1.4)],
            market: MarketCondition::Inflation,
            headline: "Inflation spike! Cash-like assets lose value, real assets gain",
        },
        EventType::MarketCrash => EventImpact {
            multipliers: &[(Stock, 0.5), (Crypto, 0.5), (Etf, 0.5), (Gold, 1.2)],
            market: MarketCondition::BearMarket,
            headline: "Market crash! Equities and crypto halve, gold holds firm",
        },
        EventType::InterestRateChange => EventImpact {
            multipliers: &[(Bond, 0.85), (RealEstate, 0.9), (Stablecoin, 1.1)],
            market: MarketCondition::Volatile,
            headline: "Interest rates move! Bonds and property soften, stablecoin yields rise",
        },
        EventType::RegulatoryChange => EventImpact {
            multipliers: &[(Crypto, 0.7), (Stablecoin, 0.9)],
            market: MarketCondition::Volatile,
            headline: "New regulation! Digital assets come under pressure",
        },
        EventType::TechBubble => EventImpact {
            multipliers: &[(Stock, 1.4), (Crypto, 1.6)],
            market: MarketCondition::Volatile,
            headline: "Tech bubble! Speculative assets surge",
        },
        EventType::Recession => EventImpact {
            multipliers: &[
                (Stock, 0.7),
                (RealEstate, 0.8),
                (Commodity, 0.8),
                (Bond, 1.2),
                (Gold, 1.15),
            ],
            market: MarketCondition::BearMarket,
            headline: "Recession! Growth assets shrink, bonds and gold gain",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;

    fn asset(asset_type: AssetType, volatility: u8) -> AssetCard {
        CardCatalog::new().create_asset_card(|c| {
            c.asset_type = asset_type;
            c.volatility = volatility;
        })
    }

    #[test]
    fn test_fixed_modifiers() {
        let crypto = asset(AssetType::Crypto, 10);
        assert_eq!(market_modifier(MarketCondition::BullMarket, &crypto), MarketModifier::Fixed(1.3));
        assert_eq!(market_modifier(MarketCondition::Crisis, &crypto), MarketModifier::Fixed(0.5));

        let gold = asset(AssetType::Gold, 4);
        assert_eq!(market_modifier(MarketCondition::Crisis, &gold), MarketModifier::Fixed(1.5));
        assert_eq!(market_modifier(MarketCondition::Inflation, &gold), MarketModifier::Fixed(1.2));
        assert_eq!(market_modifier(MarketCondition::Deflation, &gold), MarketModifier::Fixed(1.0));

        let coin = asset(AssetType::Stablecoin, 1);
        assert_eq!(market_modifier(MarketCondition::Stable, &coin), MarketModifier::Fixed(1.0));
        assert_eq!(market_modifier(MarketCondition::BearMarket, &coin), MarketModifier::Fixed(1.1));
    }

    #[test]
    fn test_volatile_width_scales() {
        let low = market_modifier(MarketCondition::Volatile, &asset(AssetType::Bond, 2));
        let high = market_modifier(MarketCondition::Volatile, &asset(AssetType::Bond, 8));

        match (low, high) {
            (MarketModifier::Random { width: lo }, MarketModifier::Random { width: hi }) => {
                assert!((lo - 0.08).abs() < 1e-12);
                assert!(hi > lo);
            }
            other => panic!("expected random modifiers, got {:?}", other),
        }
    }

    #[test]
    fn test_every_event_moves_market() {
        for event in EventType::ALL {
            let impact = event_impact(event);
            assert!(!impact.multipliers.is_empty());
            assert!(!impact.headline.is_empty());
        }
        assert_eq!(event_impact(EventType::BullRun).market, MarketCondition::BullMarket);
        assert_eq!(event_impact(EventType::EconomicCrisis).market, MarketCondition::Crisis);
        assert_eq!(event_impact(EventType::InflationSpike).market, MarketCondition::Inflation);
    }

    #[test]
    fn test_multiplier_lookup() {
        let crisis = event_impact(EventType::EconomicCrisis);
        assert_eq!(crisis.multiplier(AssetType::Gold), 1.3);
        assert_eq!(crisis.multiplier(AssetType::Etf), 1.0);
    }
}
