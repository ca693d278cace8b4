//! Deck manager: draw piles, discard, hand and the draw rules.
//!
//! ## Key Features
//!
//! - **Exclusive ownership**: Every card is in exactly one of the asset,
//!   skill or event deck, the discard pile, or the hand
//! - **Fixed composition**: Each hand targets a fixed number of asset and
//!   skill cards (3 and 2 by default)
//! - **Reshuffle on exhaustion**: An empty draw pile is refilled from
//!   discards of the same kind before the draw continues
//! - **Hand guarantee**: A full hand of one kind swaps one card for the
//!   other kind when material exists
//! - **Graceful degradation**: Running out of cards yields a smaller hand,
//!   never an error
//!
//! ## Example
//!
//! ```
//! use wealth_guardians::cards::CardCatalog;
//! use wealth_guardians::core::GameRng;
//! use wealth_guardians::deck::DeckManager;
//!
//! let mut catalog = CardCatalog::new();
//! let mut deck = DeckManager::new(&mut catalog, GameRng::new(42));
//!
//! let hand = deck.draw_hand();
//! assert_eq!(hand.assets.len(), 3);
//! assert_eq!(hand.skills.len(), 2);
//! assert_eq!(deck.status().total(), 15);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::hand::Hand;
use super::piles::{Pile, PilePosition, Piles};
use crate::cards::{Card, CardCatalog, CardKind, EventCard};
use crate::core::{CardId, GameRng, GameRngState, HandConfig};

/// Pile sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStatus {
    pub asset_deck: usize,
    pub skill_deck: usize,
    pub event_deck: usize,
    pub discard: usize,
    pub hand: usize,
}

impl DeckStatus {
    /// Cards across all piles and the hand.
    #[must_use]
    pub fn total(&self) -> usize {
        self.asset_deck + self.skill_deck + self.event_deck + self.discard + self.hand
    }
}

/// Owns every card in play and the piles they sit in.
#[derive(Clone, Debug)]
pub struct DeckManager {
    cards: FxHashMap<CardId, Card>,
    piles: Piles,
    hand_config: HandConfig,
    rng: GameRng,
}

impl DeckManager {
    /// Build a manager loaded with the starter set from `catalog`.
    #[must_use]
    pub fn new(catalog: &mut CardCatalog, rng: GameRng) -> Self {
        let mut deck = Self::empty(rng);
        deck.initialize(catalog);
        deck
    }

    /// Build a manager from an explicit card list, shuffled.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>, rng: GameRng) -> Self {
        let mut deck = Self::empty(rng);
        for card in cards {
            deck.add_card_to_deck(card);
        }
        deck.shuffle_draw_piles();
        deck
    }

    fn empty(rng: GameRng) -> Self {
        Self {
            cards: FxHashMap::default(),
            piles: Piles::new(),
            hand_config: HandConfig::default(),
            rng,
        }
    }

    /// Use a different hand composition.
    #[must_use]
    pub fn with_hand_config(mut self, hand_config: HandConfig) -> Self {
        self.hand_config = hand_config;
        self
    }

    #[must_use]
    pub fn hand_config(&self) -> HandConfig {
        self.hand_config
    }

    /// Replace all cards with a fresh starter set and shuffle each pile.
    pub fn initialize(&mut self, catalog: &mut CardCatalog) {
        self.cards.clear();
        self.piles.clear();
        for card in catalog.generate_all_preset_cards().into_cards() {
            self.add_card_to_deck(card);
        }
        self.shuffle_draw_piles();
        debug!(cards = self.cards.len(), "deck initialized");
    }

    /// Return every card to its draw pile and shuffle.
    pub fn reset(&mut self) {
        let mut owned: Vec<(CardId, CardKind)> =
            self.cards.iter().map(|(id, card)| (*id, card.kind())).collect();
        owned.sort_by_key(|(id, _)| *id);
        for (id, kind) in owned {
            self.piles.move_to(id, Pile::draw_pile(kind), PilePosition::Top);
        }
        self.shuffle_draw_piles();
        debug!(cards = self.cards.len(), "deck reset");
    }

    fn shuffle_draw_piles(&mut self) {
        for kind in CardKind::ALL {
            self.piles.shuffle(Pile::draw_pile(kind), &mut self.rng);
        }
    }

    /// Move all discarded cards of `kind` back into their draw pile and
    /// shuffle it. Returns the number of cards moved.
    pub fn reshuffle_from_discard(&mut self, kind: CardKind) -> usize {
        let matching: Vec<CardId> = self
            .piles
            .cards(Pile::Discard)
            .iter()
            .copied()
            .filter(|id| self.kind_of(*id) == Some(kind))
            .collect();

        if matching.is_empty() {
            return 0;
        }

        let draw_pile = Pile::draw_pile(kind);
        for id in &matching {
            self.piles.move_to(*id, draw_pile, PilePosition::Top);
        }
        self.piles.shuffle(draw_pile, &mut self.rng);

        debug!(%kind, moved = matching.len(), "reshuffled discards into draw pile");
        matching.len()
    }

    fn kind_of(&self, id: CardId) -> Option<CardKind> {
        self.cards.get(&id).map(Card::kind)
    }

    /// Take the top card of a kind's draw pile into `to`, refilling from
    /// discard if the pile is empty.
    fn draw_one(&mut self, kind: CardKind, to: Pile) -> Option<CardId> {
        let draw_pile = Pile::draw_pile(kind);
        if self.piles.is_empty(draw_pile) {
            self.reshuffle_from_discard(kind);
        }
        self.piles.transfer_top(draw_pile, to)
    }

    /// Discard the current hand and draw a new one.
    ///
    /// Draws up to the configured number of asset and skill cards. A pile
    /// that runs dry is refilled from discard; if that yields nothing the
    /// hand is simply smaller.
    pub fn draw_hand(&mut self) -> Hand {
        let held: Vec<CardId> = self.piles.cards(Pile::Hand).to_vec();
        for id in held {
            self.piles.move_to(id, Pile::Discard, PilePosition::Top);
        }

        let mut assets = Vec::with_capacity(self.hand_config.asset_slots);
        let mut skills = Vec::with_capacity(self.hand_config.skill_slots);

        for _ in 0..self.hand_config.asset_slots {
            match self.draw_one(CardKind::Asset, Pile::Hand) {
                Some(id) => assets.push(id),
                None => break,
            }
        }
        for _ in 0..self.hand_config.skill_slots {
            match self.draw_one(CardKind::Skill, Pile::Hand) {
                Some(id) => skills.push(id),
                None => break,
            }
        }

        self.apply_guarantee(&mut assets, &mut skills);

        let hand = self.hand();
        trace!(assets = hand.assets.len(), skills = hand.skills.len(), "hand drawn");
        hand
    }

    /// Swap one card when the hand is a full set of a single kind.
    fn apply_guarantee(&mut self, assets: &mut Vec<CardId>, skills: &mut Vec<CardId>) {
        let asset_slots = self.hand_config.asset_slots;
        let skill_slots = self.hand_config.skill_slots;
        if asset_slots == 0 || skill_slots == 0 {
            return;
        }

        let (give, take, give_kind, take_kind) = if assets.len() == asset_slots && skills.is_empty() {
            (assets, skills, CardKind::Asset, CardKind::Skill)
        } else if skills.len() == skill_slots && assets.is_empty() {
            (skills, assets, CardKind::Skill, CardKind::Asset)
        } else {
            return;
        };

        let Some(swapped_in) = self.draw_one(take_kind, Pile::Hand) else {
            return;
        };
        if let Some(swapped_out) = give.pop() {
            self.piles
                .move_to(swapped_out, Pile::draw_pile(give_kind), PilePosition::Bottom);
        }
        take.push(swapped_in);
        debug!(given = %give_kind, taken = %take_kind, "hand guarantee swapped a card");
    }

    /// Draw one event card. It goes straight to discard once drawn.
    pub fn draw_event(&mut self) -> Option<EventCard> {
        let id = self.draw_one(CardKind::Event, Pile::Discard)?;
        self.cards.get(&id).and_then(Card::as_event).cloned()
    }

    /// Move a card to the discard pile after it has been played.
    ///
    /// Returns the played card, or `None` for an unknown id.
    pub fn play_card(&mut self, id: CardId) -> Option<Card> {
        let card = self.cards.get(&id)?.clone();
        self.piles.move_to(id, Pile::Discard, PilePosition::Top);
        Some(card)
    }

    /// Discard a card from hand without playing it.
    ///
    /// Returns `false` if the card is not in hand.
    pub fn discard_card(&mut self, id: CardId) -> bool {
        if self.piles.location(id) != Some(Pile::Hand) {
            return false;
        }
        self.piles.move_to(id, Pile::Discard, PilePosition::Top);
        true
    }

    /// Add a new card on top of its draw pile.
    ///
    /// Returns `false` if a card with the same id is already present.
    pub fn add_card_to_deck(&mut self, card: Card) -> bool {
        let id = card.id();
        if !self.piles.insert(id, Pile::draw_pile(card.kind()), PilePosition::Top) {
            return false;
        }
        self.cards.insert(id, card);
        true
    }

    /// Take a card out of the draw piles for good.
    ///
    /// Cards in hand or discard are not removed.
    pub fn remove_card_from_deck(&mut self, id: CardId) -> Option<Card> {
        if !self.piles.location(id)?.is_draw_pile() {
            return None;
        }
        self.piles.remove(id);
        self.cards.remove(&id)
    }

    /// Cards in a kind's draw pile, bottom to top.
    #[must_use]
    pub fn cards_of_kind(&self, kind: CardKind) -> Vec<Card> {
        self.cards_in(Pile::draw_pile(kind))
    }

    /// Draw-pile cards whose name or description contains `query`,
    /// ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Card> {
        let needle = query.to_lowercase();
        CardKind::ALL
            .into_iter()
            .flat_map(|kind| self.piles.cards(Pile::draw_pile(kind)))
            .filter_map(|id| self.cards.get(id))
            .filter(|card| card.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    fn cards_in(&self, pile: Pile) -> Vec<Card> {
        self.piles
            .cards(pile)
            .iter()
            .filter_map(|id| self.cards.get(id))
            .cloned()
            .collect()
    }

    /// Snapshot of the current hand.
    #[must_use]
    pub fn hand(&self) -> Hand {
        let mut hand = Hand::default();
        for id in self.piles.cards(Pile::Hand) {
            match self.cards.get(id) {
                Some(Card::Asset(c)) => hand.assets.push(c.clone()),
                Some(Card::Skill(c)) => hand.skills.push(c.clone()),
                _ => {}
            }
        }
        hand
    }

    /// Look up any card owned by this manager.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Where a card currently is.
    #[must_use]
    pub fn location(&self, id: CardId) -> Option<Pile> {
        self.piles.location(id)
    }

    /// Position of the shuffle stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Pile sizes.
    #[must_use]
    pub fn status(&self) -> DeckStatus {
        DeckStatus {
            asset_deck: self.piles.len(Pile::AssetDeck),
            skill_deck: self.piles.len(Pile::SkillDeck),
            event_deck: self.piles.len(Pile::EventDeck),
            discard: self.piles.len(Pile::Discard),
            hand: self.piles.len(Pile::Hand),
        }
    }

    /// Number of cards owned.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Number of discarded cards of a kind.
    #[must_use]
    pub fn discarded(&self, kind: CardKind) -> usize {
        self.piles
            .cards(Pile::Discard)
            .iter()
            .filter(|id| self.kind_of(**id) == Some(kind))
            .count()
    }
}
