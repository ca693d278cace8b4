//! Deck and hand lifecycle.
//!
//! ## Key Types
//!
//! - `Piles`: Exclusive, ordered card locations
//! - `DeckManager`: Draw, discard, reshuffle and the hand guarantee
//! - `Hand`: Snapshot of the cards in hand
//! - `DeckStatus`: Pile sizes

pub mod hand;
pub mod manager;
pub mod piles;

pub use hand::Hand;
pub use manager::{DeckManager, DeckStatus};
pub use piles::{Pile, PilePosition, Piles};
