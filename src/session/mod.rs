//! Game session: the composition root.
//!
//! A `GameSession` owns one of everything (catalog, deck manager, effect
//! resolver, encounter generator, scheduler, player and market) and wires
//! the scheduler's phase events to the deck and the resolver:
//!
//! | Event                   | Reaction                                  |
//! |-------------------------|-------------------------------------------|
//! | `PhaseEntered(Draw)`    | redraw the hand                           |
//! | `PhaseEntered(Event)`   | draw an event card and apply it           |
//! | `PhaseEntered(Resolution)` | realize one period of portfolio returns |
//! | `BattleVictory`         | pay out coins and experience              |
//!
//! Events are dispatched as soon as the operation that raised them
//! returns, then queued for the host to drain.
//!
//! ## Example
//!
//! ```
//! use wealth_guardians::core::EngineConfig;
//! use wealth_guardians::scheduler::GamePhase;
//! use wealth_guardians::session::GameSession;
//!
//! let mut session = GameSession::new(EngineConfig::default().with_seed(42));
//! session.start();
//!
//! session.advance_phase();
//! assert_eq!(session.turn_state().current_phase, GamePhase::Draw);
//! assert_eq!(session.hand().len(), 5);
//!
//! let asset = session.hand().assets[0].clone();
//! assert!(session.buy_asset(asset.id, 1));
//! assert_eq!(session.player().coins(), 200 - asset.cost);
//! ```
//!
//! The session is single-threaded. Share it across threads by wrapping the
//! whole session in `Arc<Mutex<GameSession>>`.

pub mod player;
pub mod save;

pub use player::PlayerState;
pub use save::{RngStreams, SaveGame};

use std::time::Duration;

use tracing::{debug, info};

use crate::cards::{CardCatalog, EventCard, MarketCondition};
use crate::core::{CardId, EngineConfig, EnemyId, GameRng, Result};
use crate::deck::{DeckManager, DeckStatus, Hand};
use crate::effects::CardEffectResolver;
use crate::encounter::EncounterGenerator;
use crate::portfolio::Portfolio;
use crate::scheduler::{
    ActionCost, ActionPoints, BattleAction, BattleOutcome, BattleState, GameLoopState, GamePhase,
    LoopEvent, RewardKind, TurnScheduler, TurnState,
};

pub struct GameSession {
    config: EngineConfig,
    catalog: CardCatalog,
    deck: DeckManager,
    resolver: CardEffectResolver,
    encounters: EncounterGenerator,
    scheduler: TurnScheduler,
    player: PlayerState,
    market: MarketCondition,
    events: Vec<LoopEvent>,
    log: Vec<String>,
}

impl GameSession {
    /// A fresh session with a new player and a shuffled starter deck.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = GameRng::from_seed_or_entropy(config.seed);
        info!(seed = rng.seed(), "session created");
        Self::assemble(
            config,
            rng.for_context("deck"),
            rng.for_context("market"),
            rng.for_context("encounter"),
        )
    }

    fn assemble(
        config: EngineConfig,
        deck_rng: GameRng,
        market_rng: GameRng,
        encounter_rng: GameRng,
    ) -> Self {
        let mut catalog = CardCatalog::new();
        let deck = DeckManager::new(&mut catalog, deck_rng).with_hand_config(config.hand);

        Self {
            resolver: CardEffectResolver::new(market_rng),
            encounters: EncounterGenerator::new(encounter_rng),
            scheduler: TurnScheduler::from_config(&config),
            player: PlayerState::new(config.player),
            market: MarketCondition::default(),
            events: Vec::new(),
            log: Vec::new(),
            config,
            catalog,
            deck,
        }
    }

    /// Resume from a save. Decks are dealt fresh from the resumed deck
    /// stream; market and encounter draws continue where the save left off.
    #[must_use]
    pub fn load(save: SaveGame) -> Self {
        let streams = save.streams;
        let mut session = Self::assemble(
            save.settings,
            GameRng::from_state(&streams.deck),
            GameRng::from_state(&streams.market),
            GameRng::from_state(&streams.encounter),
        );
        session.player = save.player;
        session.market = save.market;
        session.scheduler.set_turn(save.turn);
        info!(turn = save.turn, level = session.player.level(), "session loaded");
        session
    }

    /// Snapshot what outlives the session.
    #[must_use]
    pub fn save(&self) -> SaveGame {
        debug!(turn = self.scheduler.turn(), "session saved");
        SaveGame {
            player: self.player.clone(),
            settings: self.config.clone(),
            market: self.market,
            turn: self.scheduler.turn(),
            streams: RngStreams {
                deck: self.deck.rng_state(),
                market: self.resolver.rng_state(),
                encounter: self.encounters.rng_state(),
            },
        }
    }

    // ------------------------------------------------------------------
    // Loop
    // ------------------------------------------------------------------

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    /// Drive the scheduler clock and react to what it raised.
    pub fn tick(&mut self, elapsed: Duration) {
        self.scheduler.tick(elapsed);
        self.dispatch();
    }

    pub fn advance_phase(&mut self) {
        self.scheduler.advance_phase();
        self.dispatch();
    }

    pub fn start_new_turn(&mut self) {
        self.scheduler.start_new_turn();
        self.dispatch();
    }

    /// Events dispatched since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<LoopEvent> {
        std::mem::take(&mut self.events)
    }

    /// Effect log lines since the last drain.
    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }

    fn dispatch(&mut self) {
        for event in self.scheduler.drain_events() {
            match &event {
                LoopEvent::PhaseEntered { phase: GamePhase::Draw } => {
                    let hand = self.deck.draw_hand();
                    debug!(cards = hand.len(), "draw phase dealt hand");
                }
                LoopEvent::PhaseEntered { phase: GamePhase::Event } => {
                    if let Some(card) = self.deck.draw_event() {
                        self.trigger_event(&card);
                    }
                }
                LoopEvent::PhaseEntered { phase: GamePhase::Resolution } => {
                    self.player
                        .portfolio
                        .resolve_returns(&mut self.resolver, self.market);
                    debug!(
                        value = self.player.portfolio.total_value(),
                        market = ?self.market,
                        "returns resolved"
                    );
                }
                LoopEvent::BattleVictory { rewards, .. } => {
                    for reward in rewards {
                        match reward.kind {
                            RewardKind::Coins => {
                                self.player.add_coins(reward.amount);
                            }
                            RewardKind::Experience => {
                                let gained = self.player.add_experience(reward.amount);
                                if gained > 0 {
                                    info!(level = self.player.level(), "level up");
                                }
                            }
                        }
                        self.log.push(reward.description.clone());
                    }
                }
                _ => {}
            }
            self.events.push(event);
        }
    }

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------

    /// Buy `quantity` units of an asset card in hand.
    ///
    /// Costs the card's price per unit in coins plus one play. Refused,
    /// with nothing changed, if the card is not an asset in hand or either
    /// budget falls short.
    pub fn buy_asset(&mut self, card_id: CardId, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let Some(card) = self
            .deck
            .hand()
            .assets
            .into_iter()
            .find(|c| c.id == card_id)
        else {
            return false;
        };
        let price = card.cost.saturating_mul(quantity);
        let points = self.scheduler.action_points().cost_of(ActionCost::PlayCard);
        if price > self.player.coins() || !self.scheduler.has_enough_action_points(points) {
            return false;
        }

        self.scheduler.spend(ActionCost::PlayCard);
        self.player.spend_coins(price);
        self.player
            .portfolio
            .add_asset(&card, quantity, self.scheduler.turn());
        self.deck.play_card(card_id);
        info!(card = %card.name, quantity, price, "asset bought");
        true
    }

    /// Sell up to `quantity` units of a position at its current value.
    ///
    /// Returns the number of units sold.
    pub fn sell_asset(&mut self, card_id: CardId, quantity: u32) -> u32 {
        let Some(position) = self.player.portfolio.get(card_id) else {
            return 0;
        };
        let unit_value = position.current_value / f64::from(position.quantity);
        let sold = self.player.portfolio.remove_asset(card_id, quantity);
        let proceeds = (unit_value * f64::from(sold)).max(0.0).round() as u32;
        self.player.add_coins(proceeds);
        debug!(card = %card_id, sold, proceeds, "asset sold");
        sold
    }

    /// Play a skill card from hand against the portfolio.
    ///
    /// Returns the effect log, or `None` if the card is not a skill in
    /// hand or the action points fall short.
    pub fn play_skill(&mut self, card_id: CardId) -> Option<Vec<String>> {
        let skill = self
            .deck
            .hand()
            .skills
            .into_iter()
            .find(|c| c.id == card_id)?;
        if !self.scheduler.spend(ActionCost::UseSkill) {
            return None;
        }
        let outcome = self
            .resolver
            .apply_skill(&skill, &self.player.portfolio, self.market);
        self.player.portfolio = outcome.portfolio;
        self.deck.play_card(card_id);
        self.log.extend(outcome.log.iter().cloned());
        Some(outcome.log)
    }

    /// Apply an event card to the portfolio and the market.
    pub fn trigger_event(&mut self, event: &EventCard) -> Vec<String> {
        let outcome = self
            .resolver
            .apply_event(event, &self.player.portfolio, self.market);
        info!(event = %event.name, market = ?outcome.market, "market event");
        self.player.portfolio = outcome.portfolio;
        self.market = outcome.market;
        self.log.extend(outcome.log.iter().cloned());
        outcome.log
    }

    /// Discard a card from hand unplayed.
    pub fn discard_card(&mut self, card_id: CardId) -> bool {
        self.deck.discard_card(card_id)
    }

    /// Spend points on a non-card action.
    pub fn use_action_points(&mut self, amount: u32) -> bool {
        self.scheduler.use_action_points(amount)
    }

    // ------------------------------------------------------------------
    // Battle
    // ------------------------------------------------------------------

    /// Start a battle against an enemy scaled to the player's level.
    pub fn start_encounter(&mut self) -> EnemyId {
        let enemy = self.encounters.for_level(self.player.level());
        let id = enemy.id;
        self.scheduler.start_battle(enemy);
        self.dispatch();
        id
    }

    /// Start a battle against a specific boss.
    pub fn start_boss_encounter(&mut self, tag: &str) -> Result<EnemyId> {
        let enemy = self.encounters.boss_enemy(self.player.level(), Some(tag))?;
        let id = enemy.id;
        self.scheduler.start_battle(enemy);
        self.dispatch();
        Ok(id)
    }

    pub fn battle_action(&mut self, action: BattleAction) -> Result<Option<BattleOutcome>> {
        let outcome = self.scheduler.perform_battle_action(action)?;
        self.dispatch();
        Ok(outcome)
    }

    pub fn enemy_turn(&mut self) -> Result<u32> {
        let damage = self.scheduler.enemy_turn()?;
        self.dispatch();
        Ok(damage)
    }

    pub fn end_battle(&mut self) {
        self.scheduler.end_battle();
        self.dispatch();
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn hand(&self) -> Hand {
        self.deck.hand()
    }

    #[must_use]
    pub fn deck(&self) -> &DeckManager {
        &self.deck
    }

    #[must_use]
    pub fn deck_status(&self) -> DeckStatus {
        self.deck.status()
    }

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.player.portfolio
    }

    #[must_use]
    pub fn market(&self) -> MarketCondition {
        self.market
    }

    /// Cards minted so far by this session's catalog.
    #[must_use]
    pub fn cards_issued(&self) -> u32 {
        self.catalog.issued()
    }

    #[must_use]
    pub fn portfolio_risk(&self) -> u32 {
        CardEffectResolver::portfolio_risk(&self.player.portfolio)
    }

    #[must_use]
    pub fn diversification_score(&self) -> u32 {
        CardEffectResolver::diversification_score(&self.player.portfolio)
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.scheduler.turn_state()
    }

    #[must_use]
    pub fn loop_state(&self) -> GameLoopState {
        self.scheduler.loop_state()
    }

    #[must_use]
    pub fn action_points(&self) -> &ActionPoints {
        self.scheduler.action_points()
    }

    #[must_use]
    pub fn battle_state(&self) -> &BattleState {
        self.scheduler.battle_state()
    }

    #[must_use]
    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    /// Direct scheduler access for settings such as auto-advance.
    ///
    /// Events raised through this handle are dispatched on the next
    /// session operation that drives the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut TurnScheduler {
        &mut self.scheduler
    }
}
