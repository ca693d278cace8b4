//! Portfolio snapshots.
//!
//! A `Portfolio` is a plain value: an ordered list of positions backed by
//! an `im::Vector`, so cloning a snapshot before handing it to the effect
//! resolver is O(1). Positions are keyed by the id of their asset card.
//!
//! ## Example
//!
//! ```
//! use wealth_guardians::cards::CardCatalog;
//! use wealth_guardians::portfolio::Portfolio;
//!
//! let mut catalog = CardCatalog::new();
//! let gold = catalog.create_asset_card(|c| c.cost = 30);
//!
//! let mut portfolio = Portfolio::new();
//! portfolio.add_asset(&gold, 2, 1);
//! portfolio.add_asset(&gold, 1, 2);
//!
//! assert_eq!(portfolio.len(), 1);
//! assert_eq!(portfolio.total_value(), 90.0);
//! assert_eq!(portfolio.remove_asset(gold.id, 5), 3);
//! assert!(portfolio.is_empty());
//! ```

pub mod holding;

pub use holding::PortfolioAsset;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{AssetCard, AssetType, MarketCondition};
use crate::core::CardId;
use crate::effects::CardEffectResolver;

/// A collection of positions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    holdings: Vector<PortfolioAsset>,
}

impl Portfolio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit positions. Zero-quantity positions are dropped.
    #[must_use]
    pub fn from_holdings(holdings: impl IntoIterator<Item = PortfolioAsset>) -> Self {
        Self {
            holdings: holdings.into_iter().filter(|h| h.quantity > 0).collect(),
        }
    }

    /// Buy `quantity` units of `card` at its listed cost.
    ///
    /// Opens a position on first purchase and blends the cost basis on
    /// later ones. Buying zero units does nothing.
    pub fn add_asset(&mut self, card: &AssetCard, quantity: u32, turn: u32) {
        if quantity == 0 {
            return;
        }
        match self.holdings.iter_mut().find(|h| h.id() == card.id) {
            Some(position) => position.top_up(quantity, f64::from(card.cost)),
            None => self
                .holdings
                .push_back(PortfolioAsset::open(card.clone(), quantity, turn)),
        }
    }

    /// Sell up to `quantity` units of a position.
    ///
    /// Returns the number of units sold, 0 for an unknown id. A position
    /// that reaches zero units is removed.
    pub fn remove_asset(&mut self, id: CardId, quantity: u32) -> u32 {
        let Some(index) = self.holdings.iter().position(|h| h.id() == id) else {
            return 0;
        };
        let sold = self.holdings[index].reduce(quantity);
        if self.holdings[index].quantity == 0 {
            self.holdings.remove(index);
        }
        sold
    }

    /// Realize one period of returns.
    ///
    /// Each position's return is recomputed for `market` and its value
    /// grows by that percentage.
    pub fn resolve_returns(&mut self, resolver: &mut CardEffectResolver, market: MarketCondition) {
        for position in self.holdings.iter_mut() {
            let ret = resolver.asset_return(&position.card, market);
            position.period_return = ret;
            position.current_value *= 1.0 + ret / 100.0;
        }
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&PortfolioAsset> {
        self.holdings.iter().find(|h| h.id() == id)
    }

    #[must_use]
    pub fn holdings(&self) -> &Vector<PortfolioAsset> {
        &self.holdings
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortfolioAsset> {
        self.holdings.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PortfolioAsset> {
        self.holdings.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of position values.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.current_value).sum()
    }

    /// Sum of position returns.
    #[must_use]
    pub fn total_return(&self) -> f64 {
        self.holdings.iter().map(|h| h.period_return).sum()
    }

    /// Sum of amounts paid for units still held.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.holdings.iter().map(PortfolioAsset::total_cost).sum()
    }

    /// Number of distinct asset classes held.
    #[must_use]
    pub fn distinct_asset_types(&self) -> usize {
        self.holdings
            .iter()
            .map(PortfolioAsset::asset_type)
            .collect::<FxHashSet<AssetType>>()
            .len()
    }

    /// Whether any position is of the given class.
    #[must_use]
    pub fn holds_type(&self, asset_type: AssetType) -> bool {
        self.holdings.iter().any(|h| h.asset_type() == asset_type)
    }
}
