//! Card effect resolution.
//!
//! The `CardEffectResolver` turns cards and market conditions into
//! portfolio changes. Skill and event application never fails: an
//! inapplicable card returns the snapshot unchanged together with a log
//! line explaining why.
//!
//! Inputs are borrowed snapshots; outputs are new snapshots. The caller
//! decides whether to commit them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::market::{
    event_impact, market_modifier, volatility_width, MarketModifier, JITTER_SPREAD,
};
use crate::cards::{AssetCard, EventCard, MarketCondition, SkillCard, SkillType};
use crate::core::{GameRng, GameRngState};
use crate::portfolio::Portfolio;

/// Number of asset classes the diversification score is measured against.
const DIVERSITY_CLASSES: f64 = 8.0;

/// Result of applying a skill card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillOutcome {
    pub portfolio: Portfolio,
    pub log: Vec<String>,
}

/// Result of applying an event card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub portfolio: Portfolio,
    pub log: Vec<String>,
    pub market: MarketCondition,
}

/// Computes returns and applies card effects.
///
/// Owns the random stream used for market jitter, so two resolvers built
/// from the same seed produce the same returns.
#[derive(Clone, Debug)]
pub struct CardEffectResolver {
    rng: GameRng,
}

impl CardEffectResolver {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Position of the jitter stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Realized return of an asset for one period, in percent.
    ///
    /// `base_return × market modifier × jitter`, where the jitter is drawn
    /// from `1 ± (volatility / 10) × 0.1`. Under a volatile market the
    /// modifier itself is random; the two draws are independent.
    pub fn asset_return(&mut self, asset: &AssetCard, market: MarketCondition) -> f64 {
        let modifier = match market_modifier(market, asset) {
            MarketModifier::Fixed(factor) => factor,
            MarketModifier::Random { width } => self.rng.centered_factor(width),
        };
        let jitter = self
            .rng
            .centered_factor(volatility_width(asset.volatility, JITTER_SPREAD));

        asset.base_return * modifier * jitter
    }

    /// Apply a skill card to a portfolio snapshot.
    #[must_use]
    pub fn apply_skill(
        &self,
        skill: &SkillCard,
        portfolio: &Portfolio,
        _market: MarketCondition,
    ) -> SkillOutcome {
        let mut next = portfolio.clone();
        let mut log = Vec::new();

        match skill.skill_type {
            SkillType::Diversification => {
                let types = portfolio.distinct_asset_types();
                if types >= 3 {
                    for position in next.iter_mut() {
                        position.period_return *= 1.2;
                    }
                    log.push(format!(
                        "Diversification active: {} asset classes held, all returns up 20%",
                        types
                    ));
                } else {
                    log.push(format!(
                        "Diversification needs at least 3 asset classes (currently {})",
                        types
                    ));
                }
            }
            SkillType::StopLoss => {
                let total = portfolio.total_return();
                if total < 0.0 {
                    let reduction = total.abs() * 0.3;
                    for position in next.iter_mut().filter(|p| p.period_return < 0.0) {
                        position.period_return += reduction;
                    }
                    log.push(format!("Stop loss triggered: losses reduced by {:.2}", reduction));
                } else {
                    log.push("Stop loss: portfolio return is not negative, nothing to cut".to_string());
                }
            }
            SkillType::Rebalance => {
                let total_value = portfolio.total_value();
                if portfolio.is_empty() || total_value <= 0.0 {
                    log.push("Rebalance: nothing to rebalance".to_string());
                } else {
                    let target = 1.0 / portfolio.len() as f64;
                    for position in next.iter_mut() {
                        let share = position.current_value / total_value;
                        position.period_return += (target - share) * 0.1;
                    }
                    log.push("Rebalance applied: under-weight holdings earn a bonus".to_string());
                }
            }
            SkillType::LongTerm => {
                for position in next.iter_mut() {
                    position.period_return += position.period_return * 0.15;
                }
                log.push("Long-term hold: returns compound with a 15% bonus".to_string());
            }
            SkillType::Hedge => {
                let mut hedged = 0;
                for position in next.iter_mut().filter(|p| p.asset_type().is_safe_haven()) {
                    position.period_return *= 1.25;
                    hedged += 1;
                }
                if hedged > 0 {
                    log.push("Hedge active: safe-haven returns up 25%".to_string());
                } else {
                    log.push("Hedge needs a gold or bond holding".to_string());
                }
            }
            SkillType::Arbitrage | SkillType::Momentum | SkillType::Value => {
                debug!(skill = ?skill.skill_type, "skill has no portfolio effect");
                log.push(format!("{}: no portfolio effect", skill.name));
            }
        }

        debug!(skill = %skill.name, kind = ?skill.skill_type, "skill applied");
        SkillOutcome { portfolio: next, log }
    }

    /// Apply an event card: scale affected returns and move the market.
    #[must_use]
    pub fn apply_event(
        &self,
        event: &EventCard,
        portfolio: &Portfolio,
        market: MarketCondition,
    ) -> EventOutcome {
        let impact = event_impact(event.event_type);
        let mut next = portfolio.clone();

        for position in next.iter_mut() {
            position.period_return *= impact.multiplier(position.asset_type());
        }

        debug!(
            event = %event.name,
            from = ?market,
            to = ?impact.market,
            "event applied"
        );
        EventOutcome {
            portfolio: next,
            log: vec![impact.headline.to_string()],
            market: impact.market,
        }
    }

    /// Risk score in `[0, 100]`.
    ///
    /// Mean of `base_risk × quantity` per holding, minus a bonus of up to
    /// 20 for spreading value across holdings. Empty portfolios score 0.
    #[must_use]
    pub fn portfolio_risk(portfolio: &Portfolio) -> u32 {
        if portfolio.is_empty() {
            return 0;
        }

        let weighted_risk: f64 = portfolio
            .iter()
            .map(|p| f64::from(p.card.base_risk) * f64::from(p.quantity))
            .sum();
        let average_risk = weighted_risk / portfolio.len() as f64;

        let concentration = concentration(portfolio).unwrap_or(1.0);
        let bonus = ((1.0 - concentration) * 20.0).max(0.0);

        (average_risk - bonus).clamp(0.0, 100.0).round() as u32
    }

    /// Diversification score in `[0, 100]`.
    ///
    /// 60% from the share of asset classes held, 40% from how evenly value
    /// is spread. Empty portfolios score 0.
    #[must_use]
    pub fn diversification_score(portfolio: &Portfolio) -> u32 {
        if portfolio.is_empty() {
            return 0;
        }

        let type_diversity = portfolio.distinct_asset_types() as f64 / DIVERSITY_CLASSES;
        let weight_diversity = concentration(portfolio).map_or(0.0, |c| 1.0 - c);

        (type_diversity * 60.0 + weight_diversity * 40.0)
            .clamp(0.0, 100.0)
            .round() as u32
    }

    /// Whether a skill would have an effect on this portfolio.
    #[must_use]
    pub fn can_activate_skill(
        skill: &SkillCard,
        portfolio: &Portfolio,
        _market: MarketCondition,
    ) -> bool {
        match skill.skill_type {
            SkillType::Diversification => portfolio.distinct_asset_types() >= 3,
            SkillType::StopLoss => portfolio.total_return() < 0.0,
            SkillType::Rebalance => portfolio.len() >= 2,
            SkillType::LongTerm => !portfolio.is_empty(),
            SkillType::Hedge => portfolio.iter().any(|p| p.asset_type().is_safe_haven()),
            SkillType::Arbitrage | SkillType::Momentum | SkillType::Value => true,
        }
    }
}

/// Herfindahl index of current values, `None` when total value is not
/// positive.
fn concentration(portfolio: &Portfolio) -> Option<f64> {
    let total = portfolio.total_value();
    if total <= 0.0 {
        return None;
    }
    Some(
        portfolio
            .iter()
            .map(|p| {
                let weight = p.current_value / total;
                weight * weight
            })
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AssetType, CardCatalog, EventType};
    use crate::portfolio::PortfolioAsset;

    fn position(catalog: &mut CardCatalog, asset_type: AssetType, value: f64, ret: f64) -> PortfolioAsset {
        let card = catalog.create_asset_card(|c| {
            c.asset_type = asset_type;
            c.cost = 10;
        });
        let mut p = PortfolioAsset::open(card, 1, 1);
        p.current_value = value;
        p.period_return = ret;
        p
    }

    fn skill(skill_type: SkillType) -> SkillCard {
        CardCatalog::new().create_skill_card(|c| c.skill_type = skill_type)
    }

    fn resolver() -> CardEffectResolver {
        CardEffectResolver::new(GameRng::new(11))
    }

    #[test]
    fn test_diversification_thresholds() {
        let mut catalog = CardCatalog::new();
        let three = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Stock, 10.0, 5.0),
            position(&mut catalog, AssetType::Bond, 10.0, 2.0),
            position(&mut catalog, AssetType::Gold, 10.0, -1.0),
        ]);
        let outcome = resolver().apply_skill(&skill(SkillType::Diversification), &three, MarketCondition::Stable);
        let returns: Vec<f64> = outcome.portfolio.iter().map(|p| p.period_return).collect();
        assert_eq!(returns, vec![5.0 * 1.2, 2.0 * 1.2, -1.0 * 1.2]);

        let two = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Stock, 10.0, 5.0),
            position(&mut catalog, AssetType::Bond, 10.0, 2.0),
        ]);
        let outcome = resolver().apply_skill(&skill(SkillType::Diversification), &two, MarketCondition::Stable);
        assert_eq!(outcome.portfolio, two);
        assert_eq!(outcome.log.len(), 1);
    }

    #[test]
    fn test_stop_loss() {
        let mut catalog = CardCatalog::new();
        let portfolio = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Stock, 10.0, -10.0),
            position(&mut catalog, AssetType::Bond, 10.0, 4.0),
        ]);
        let outcome = resolver().apply_skill(&skill(SkillType::StopLoss), &portfolio, MarketCondition::Stable);
        let returns: Vec<f64> = outcome.portfolio.iter().map(|p| p.period_return).collect();

        // Aggregate -6, reduction 1.8 added to the losing holding only
        assert!((returns[0] - (-8.2)).abs() < 1e-9);
        assert_eq!(returns[1], 4.0);
    }

    #[test]
    fn test_rebalance_rewards_underweight() {
        let mut catalog = CardCatalog::new();
        let portfolio = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Stock, 75.0, 0.0),
            position(&mut catalog, AssetType::Bond, 25.0, 0.0),
        ]);
        let outcome = resolver().apply_skill(&skill(SkillType::Rebalance), &portfolio, MarketCondition::Stable);
        let returns: Vec<f64> = outcome.portfolio.iter().map(|p| p.period_return).collect();

        assert!((returns[0] - (-0.025)).abs() < 1e-9);
        assert!((returns[1] - 0.025).abs() < 1e-9);
    }

    #[test]
    fn test_long_term_and_hedge() {
        let mut catalog = CardCatalog::new();
        let portfolio = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Gold, 10.0, 4.0),
            position(&mut catalog, AssetType::Crypto, 10.0, 10.0),
        ]);

        let long = resolver().apply_skill(&skill(SkillType::LongTerm), &portfolio, MarketCondition::Stable);
        let returns: Vec<f64> = long.portfolio.iter().map(|p| p.period_return).collect();
        assert!((returns[0] - 4.6).abs() < 1e-9);
        assert!((returns[1] - 11.5).abs() < 1e-9);

        let hedge = resolver().apply_skill(&skill(SkillType::Hedge), &portfolio, MarketCondition::Stable);
        let returns: Vec<f64> = hedge.portfolio.iter().map(|p| p.period_return).collect();
        assert_eq!(returns, vec![5.0, 10.0]);
    }

    #[test]
    fn test_unhandled_skill_is_noop() {
        let mut catalog = CardCatalog::new();
        let portfolio = Portfolio::from_holdings(vec![position(&mut catalog, AssetType::Stock, 10.0, 3.0)]);
        let outcome = resolver().apply_skill(&skill(SkillType::Momentum), &portfolio, MarketCondition::Stable);

        assert_eq!(outcome.portfolio, portfolio);
        assert_eq!(outcome.log.len(), 1);
        assert!(CardEffectResolver::can_activate_skill(&skill(SkillType::Value), &portfolio, MarketCondition::Stable));
    }

    #[test]
    fn test_event_changes_market() {
        let mut catalog = CardCatalog::new();
        let portfolio = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Stock, 10.0, 4.0),
            position(&mut catalog, AssetType::Gold, 10.0, 2.0),
        ]);
        let event = catalog.create_event_card(|c| c.event_type = EventType::BullRun);

        let outcome = resolver().apply_event(&event, &portfolio, MarketCondition::Stable);
        let returns: Vec<f64> = outcome.portfolio.iter().map(|p| p.period_return).collect();

        assert_eq!(returns, vec![6.0, 2.0]);
        assert_eq!(outcome.market, MarketCondition::BullMarket);
        assert_eq!(outcome.log.len(), 1);
    }

    #[test]
    fn test_risk_and_diversification_empty() {
        let empty = Portfolio::new();
        assert_eq!(CardEffectResolver::portfolio_risk(&empty), 0);
        assert_eq!(CardEffectResolver::diversification_score(&empty), 0);
    }

    #[test]
    fn test_scores_for_known_portfolio() {
        let mut catalog = CardCatalog::new();
        let portfolio = Portfolio::from_holdings(vec![
            position(&mut catalog, AssetType::Stock, 10.0, 0.0),
            position(&mut catalog, AssetType::Bond, 10.0, 0.0),
        ]);

        // Both base_risk 5, quantity 1: average 5; concentration 0.5, bonus 10
        assert_eq!(CardEffectResolver::portfolio_risk(&portfolio), 0);
        // 2/8 × 60 + 0.5 × 40 = 35
        assert_eq!(CardEffectResolver::diversification_score(&portfolio), 35);
    }

    #[test]
    fn test_stablecoin_return_bounds() {
        let mut catalog = CardCatalog::new();
        let coin = catalog.create_asset_card(|c| {
            c.asset_type = AssetType::Stablecoin;
            c.base_return = 2.0;
            c.volatility = 1;
        });
        let mut resolver = resolver();

        for _ in 0..500 {
            let ret = resolver.asset_return(&coin, MarketCondition::Stable);
            assert!((1.98..=2.02).contains(&ret), "return {} outside ±1%", ret);
        }
    }

    #[test]
    fn test_activation_preconditions() {
        let mut catalog = CardCatalog::new();
        let losing = Portfolio::from_holdings(vec![position(&mut catalog, AssetType::Crypto, 10.0, -3.0)]);
        let market = MarketCondition::Stable;

        assert!(CardEffectResolver::can_activate_skill(&skill(SkillType::StopLoss), &losing, market));
        assert!(!CardEffectResolver::can_activate_skill(&skill(SkillType::Hedge), &losing, market));
        assert!(!CardEffectResolver::can_activate_skill(&skill(SkillType::Rebalance), &losing, market));
        assert!(CardEffectResolver::can_activate_skill(&skill(SkillType::LongTerm), &losing, market));
        assert!(!CardEffectResolver::can_activate_skill(&skill(SkillType::LongTerm), &Portfolio::new(), market));
    }
}
