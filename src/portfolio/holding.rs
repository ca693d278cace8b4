//! A single portfolio position.

use serde::{Deserialize, Serialize};

use crate::cards::{AssetCard, AssetType};
use crate::core::CardId;

/// A held quantity of one asset card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAsset {
    /// The asset definition, held by value.
    pub card: AssetCard,

    /// Units held. Always positive while the position exists.
    pub quantity: u32,

    /// Weighted-average purchase price per unit.
    pub cost_basis: f64,

    /// Current market value of the whole position.
    pub current_value: f64,

    /// Most recently realized period return, in percent.
    #[serde(rename = "return")]
    pub period_return: f64,

    /// Turn of the first purchase.
    pub acquired_turn: u32,
}

impl PortfolioAsset {
    /// Open a position at `card.cost` per unit.
    #[must_use]
    pub fn open(card: AssetCard, quantity: u32, turn: u32) -> Self {
        let price = f64::from(card.cost);
        Self {
            card,
            quantity,
            cost_basis: price,
            current_value: price * f64::from(quantity),
            period_return: 0.0,
            acquired_turn: turn,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.card.id
    }

    #[must_use]
    pub fn asset_type(&self) -> AssetType {
        self.card.asset_type
    }

    /// Total amount paid for the units still held.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.cost_basis * f64::from(self.quantity)
    }

    /// Unrealized gain against cost.
    #[must_use]
    pub fn unrealized_gain(&self) -> f64 {
        self.current_value - self.total_cost()
    }

    /// Buy more units at `price`, blending the cost basis.
    pub(crate) fn top_up(&mut self, quantity: u32, price: f64) {
        let held = f64::from(self.quantity);
        let added = f64::from(quantity);
        self.cost_basis = (self.cost_basis * held + price * added) / (held + added);
        self.quantity += quantity;
        self.current_value += price * added;
    }

    /// Sell up to `quantity` units. Returns the number sold.
    pub(crate) fn reduce(&mut self, quantity: u32) -> u32 {
        let sold = quantity.min(self.quantity);
        if sold == 0 {
            return 0;
        }
        let remaining = self.quantity - sold;
        self.current_value *= f64::from(remaining) / f64::from(self.quantity);
        self.quantity = remaining;
        sold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;

    fn bond(cost: u32) -> AssetCard {
        CardCatalog::new().create_asset_card(|c| {
            c.asset_type = AssetType::Bond;
            c.cost = cost;
        })
    }

    #[test]
    fn test_open() {
        let position = PortfolioAsset::open(bond(15), 4, 2);
        assert_eq!(position.quantity, 4);
        assert_eq!(position.cost_basis, 15.0);
        assert_eq!(position.current_value, 60.0);
        assert_eq!(position.acquired_turn, 2);
        assert_eq!(position.unrealized_gain(), 0.0);
    }

    #[test]
    fn test_top_up_blends_basis() {
        let mut position = PortfolioAsset::open(bond(10), 2, 1);
        position.top_up(2, 20.0);

        assert_eq!(position.quantity, 4);
        assert!((position.cost_basis - 15.0).abs() < 1e-9);
        assert!((position.current_value - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_reduce_scales_value() {
        let mut position = PortfolioAsset::open(bond(10), 4, 1);
        position.current_value = 80.0;

        assert_eq!(position.reduce(1), 1);
        assert_eq!(position.quantity, 3);
        assert!((position.current_value - 60.0).abs() < 1e-9);

        assert_eq!(position.reduce(10), 3);
        assert_eq!(position.quantity, 0);
        assert_eq!(position.current_value, 0.0);
    }

    #[test]
    fn test_return_field_name() {
        let position = PortfolioAsset::open(bond(10), 1, 1);
        let json = serde_json::to_string(&position).unwrap();
        assert!(json.contains("\"return\":0.0"));
    }
}
