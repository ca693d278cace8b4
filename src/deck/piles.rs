//! Card location tracking.
//!
//! `Piles` records which pile every card is in and keeps each pile in
//! order. A card is in at most one pile at a time; moving it removes it
//! from the old pile in the same call.
//!
//! Index 0 of a pile is the bottom and the last index is the top. Draws
//! pop from the top.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::{CardId, GameRng};

/// A place a card can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    AssetDeck,
    SkillDeck,
    EventDeck,
    Discard,
    Hand,
}

impl Pile {
    pub const ALL: [Pile; 5] = [
        Pile::AssetDeck,
        Pile::SkillDeck,
        Pile::EventDeck,
        Pile::Discard,
        Pile::Hand,
    ];

    /// The draw pile for a card kind.
    #[must_use]
    pub fn draw_pile(kind: CardKind) -> Self {
        match kind {
            CardKind::Asset => Pile::AssetDeck,
            CardKind::Skill => Pile::SkillDeck,
            CardKind::Event => Pile::EventDeck,
        }
    }

    /// Whether this is one of the three draw piles.
    #[must_use]
    pub fn is_draw_pile(self) -> bool {
        matches!(self, Pile::AssetDeck | Pile::SkillDeck | Pile::EventDeck)
    }
}

/// Where to insert a card in a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    Top,
    Bottom,
}

/// Exclusive card locations across all piles.
#[derive(Clone, Debug, Default)]
pub struct Piles {
    locations: FxHashMap<CardId, Pile>,
    order: FxHashMap<Pile, Vec<CardId>>,
}

impl Piles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn place(&mut self, card: CardId, pile: Pile, position: PilePosition) {
        self.locations.insert(card, pile);
        let order = self.order.entry(pile).or_default();
        match position {
            PilePosition::Top => order.push(card),
            PilePosition::Bottom => order.insert(0, card),
        }
    }

    /// Start tracking a card.
    ///
    /// Returns `false` and changes nothing if the card is already tracked.
    pub fn insert(&mut self, card: CardId, pile: Pile, position: PilePosition) -> bool {
        if self.locations.contains_key(&card) {
            return false;
        }
        self.place(card, pile, position);
        true
    }

    /// Move a tracked card to another pile.
    ///
    /// Returns the pile it came from, or `None` if the card is unknown.
    pub fn move_to(&mut self, card: CardId, pile: Pile, position: PilePosition) -> Option<Pile> {
        let old = self.remove(card)?;
        self.place(card, pile, position);
        Some(old)
    }

    /// Stop tracking a card.
    pub fn remove(&mut self, card: CardId) -> Option<Pile> {
        let pile = self.locations.remove(&card)?;
        if let Some(order) = self.order.get_mut(&pile) {
            order.retain(|&c| c != card);
        }
        Some(pile)
    }

    /// Remove the top card of a pile from tracking.
    pub fn pop_top(&mut self, pile: Pile) -> Option<CardId> {
        let card = self.order.get_mut(&pile)?.pop()?;
        self.locations.remove(&card);
        Some(card)
    }

    /// Move the top card of one pile onto the top of another.
    pub fn transfer_top(&mut self, from: Pile, to: Pile) -> Option<CardId> {
        let card = self.pop_top(from)?;
        self.place(card, to, PilePosition::Top);
        Some(card)
    }

    #[must_use]
    pub fn location(&self, card: CardId) -> Option<Pile> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }

    /// Cards in a pile, bottom to top.
    #[must_use]
    pub fn cards(&self, pile: Pile) -> &[CardId] {
        self.order.get(&pile).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self, pile: Pile) -> usize {
        self.cards(pile).len()
    }

    #[must_use]
    pub fn is_empty(&self, pile: Pile) -> bool {
        self.len(pile) == 0
    }

    /// Total cards tracked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.locations.len()
    }

    /// Shuffle a pile in place.
    pub fn shuffle(&mut self, pile: Pile, rng: &mut GameRng) {
        if let Some(order) = self.order.get_mut(&pile) {
            rng.shuffle(order);
        }
    }

    /// Forget every card.
    pub fn clear(&mut self) {
        self.locations.clear();
        self.order.clear();
    }
}
