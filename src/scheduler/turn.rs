//! Turn and phase scheduler.
//!
//! `TurnScheduler` owns the phase cycle, the action point budget and the
//! battle sub-state. It has no clock of its own: the host calls `tick`
//! with elapsed time, and the scheduler advances its periodic timers and
//! queues `LoopEvent`s for the host to drain.
//!
//! ## Timers
//!
//! | Timer   | Period             | Runs when                        |
//! |---------|--------------------|----------------------------------|
//! | phase   | `phase_tick`       | active, not paused, not in battle |
//! | regen   | `regen_interval`   | active, not paused, not in battle |
//! | victory | `victory_delay`    | a victory is pending              |
//!
//! Starting a battle pauses the loop; ending it restores the pause state
//! the host asked for. `pause`, `resume` and `start` issued during a
//! battle are recorded and applied when the battle ends.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action_points::{ActionCost, ActionPoints};
use super::battle::{BattleAction, BattleOutcome, BattleReward, BattleState};
use super::phase::GamePhase;
use super::timer::PeriodicTimer;
use crate::core::{ActionPointConfig, BattleConfig, EngineConfig, EngineError, EnemyId, LoopConfig, Result};
use crate::encounter::Enemy;

/// Notifications produced by the scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoopEvent {
    PhaseEntered { phase: GamePhase },
    /// The phase clock ran out with auto-advance off. Emitted once per phase.
    PhaseTimedOut { phase: GamePhase },
    ActionPointsRegenerated { current: u32 },
    BattleStarted { enemy: EnemyId },
    BattleVictory { enemy: EnemyId, rewards: Vec<BattleReward> },
    BattleDefeat { enemy: EnemyId },
    BattleEnded { outcome: Option<BattleOutcome> },
}

/// Snapshot of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub current_turn: u32,
    pub current_phase: GamePhase,
    pub action_points: u32,
    pub max_action_points: u32,
    /// Whole seconds left in the phase.
    pub phase_time_remaining: u32,
    pub is_player_turn: bool,
}

/// Snapshot of the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLoopState {
    pub is_active: bool,
    pub current_phase: GamePhase,
    /// Seconds elapsed in the phase.
    pub phase_timer: u32,
    pub phase_duration: u32,
    pub auto_advance: bool,
    pub paused: bool,
}

#[derive(Clone, Debug)]
pub struct TurnScheduler {
    config: LoopConfig,
    battle_config: BattleConfig,
    turn: u32,
    phase: GamePhase,
    phase_time_remaining: u32,
    phase_elapsed: u32,
    timed_out: bool,
    active: bool,
    paused: bool,
    points: ActionPoints,
    phase_timer: PeriodicTimer,
    regen_timer: PeriodicTimer,
    battle: BattleState,
    paused_before_battle: bool,
    victory_countdown: Option<Duration>,
    events: VecDeque<LoopEvent>,
}

impl TurnScheduler {
    /// An inactive scheduler at turn 1, `Prepare`, with full points.
    #[must_use]
    pub fn new(config: LoopConfig, points: &ActionPointConfig, battle_config: BattleConfig) -> Self {
        Self {
            phase_time_remaining: config.phase_duration_secs,
            phase_timer: PeriodicTimer::new(config.phase_tick),
            regen_timer: PeriodicTimer::new(config.regen_interval),
            battle: BattleState::idle(battle_config.player_max_health),
            config,
            battle_config,
            turn: 1,
            phase: GamePhase::Prepare,
            phase_elapsed: 0,
            timed_out: false,
            active: false,
            paused: false,
            points: ActionPoints::new(points),
            paused_before_battle: false,
            victory_countdown: None,
            events: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.game_loop.clone(), &config.action_points, config.battle)
    }

    // ------------------------------------------------------------------
    // Loop control
    // ------------------------------------------------------------------

    /// Activate the loop and arm its timers.
    ///
    /// During a battle the loop stays frozen; it runs once the battle ends.
    pub fn start(&mut self) {
        self.active = true;
        self.set_user_paused(false);
        self.arm_timers();
        info!(turn = self.turn, phase = %self.phase, "game loop started");
    }

    /// Deactivate the loop. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.active {
            info!(turn = self.turn, "game loop stopped");
        }
        self.active = false;
        self.phase_timer.disarm();
        self.regen_timer.disarm();
    }

    /// Pause the loop. Partial timer periods are kept.
    ///
    /// During a battle this takes effect when the battle ends.
    pub fn pause(&mut self) {
        self.set_user_paused(true);
    }

    /// Undo `pause`. Has no effect on timer progress.
    pub fn resume(&mut self) {
        self.set_user_paused(false);
    }

    fn set_user_paused(&mut self, paused: bool) {
        if self.battle.is_in_battle() {
            self.paused_before_battle = paused;
        } else {
            self.paused = paused;
        }
    }

    /// Stop the loop and drop all transient state.
    pub fn destroy(&mut self) {
        self.stop();
        self.battle.clear();
        self.victory_countdown = None;
        self.events.clear();
    }

    fn arm_timers(&mut self) {
        self.phase_timer.arm();
        self.regen_timer.arm();
    }

    fn reset_phase_clock(&mut self) {
        self.phase_time_remaining = self.config.phase_duration_secs;
        self.phase_elapsed = 0;
        self.timed_out = false;
    }

    /// Move to the next phase. Entering `Prepare` refills action points.
    pub fn advance_phase(&mut self) {
        self.phase = self.phase.next();
        self.reset_phase_clock();
        if self.phase == GamePhase::Prepare {
            self.points.refill();
        }
        if self.active {
            self.phase_timer.arm();
        }
        debug!(turn = self.turn, phase = %self.phase, "phase entered");
        self.events.push_back(LoopEvent::PhaseEntered { phase: self.phase });
    }

    /// Begin the next turn at `Prepare` with full points.
    pub fn start_new_turn(&mut self) {
        self.turn += 1;
        self.phase = GamePhase::Prepare;
        self.points.refill();
        self.reset_phase_clock();
        if self.active {
            self.phase_timer.arm();
        }
        info!(turn = self.turn, "new turn");
        self.events.push_back(LoopEvent::PhaseEntered { phase: self.phase });
    }

    /// Jump to a turn number, e.g. when resuming a saved game.
    pub(crate) fn set_turn(&mut self, turn: u32) {
        self.turn = turn.max(1);
    }

    /// Feed elapsed time to every timer.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(remaining) = self.victory_countdown {
            if remaining <= elapsed {
                // The elapsed time belonged to the battle
                self.victory_countdown = None;
                self.end_battle();
                return;
            } else {
                self.victory_countdown = Some(remaining - elapsed);
            }
        }

        if !self.active || self.paused || self.battle.is_in_battle() {
            return;
        }

        let fired = self.phase_timer.advance(elapsed);
        for _ in 0..fired {
            self.phase_second();
        }

        let fired = self.regen_timer.advance(elapsed);
        for _ in 0..fired {
            if self.points.regenerate() > 0 {
                self.events.push_back(LoopEvent::ActionPointsRegenerated {
                    current: self.points.current(),
                });
            }
        }
    }

    fn phase_second(&mut self) {
        self.phase_elapsed += 1;
        self.phase_time_remaining = self.phase_time_remaining.saturating_sub(1);
        if self.phase_time_remaining > 0 {
            return;
        }
        if self.config.auto_advance {
            self.advance_phase();
        } else if !self.timed_out {
            self.timed_out = true;
            debug!(phase = %self.phase, "phase timed out");
            self.events.push_back(LoopEvent::PhaseTimedOut { phase: self.phase });
        }
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<LoopEvent> {
        self.events.drain(..).collect()
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.config.auto_advance = enabled;
    }

    /// Change the phase length. Restarts the current phase clock.
    pub fn set_phase_duration(&mut self, secs: u32) {
        self.config.phase_duration_secs = secs;
        self.reset_phase_clock();
    }

    // ------------------------------------------------------------------
    // Action points
    // ------------------------------------------------------------------

    pub fn use_action_points(&mut self, amount: u32) -> bool {
        self.points.use_points(amount)
    }

    #[must_use]
    pub fn has_enough_action_points(&self, amount: u32) -> bool {
        self.points.has_enough(amount)
    }

    /// Debit the cost of an action.
    pub fn spend(&mut self, action: ActionCost) -> bool {
        self.points.spend(action)
    }

    pub fn restore_action_points(&mut self, amount: u32) -> u32 {
        self.points.restore(amount)
    }

    // ------------------------------------------------------------------
    // Battle
    // ------------------------------------------------------------------

    /// Enter battle against `enemy`, pausing the loop.
    ///
    /// Starting a battle while one is running replaces the enemy but keeps
    /// the pause state recorded by the first battle.
    pub fn start_battle(&mut self, enemy: Enemy) {
        if !self.battle.is_in_battle() {
            self.paused_before_battle = self.paused;
        }
        self.victory_countdown = None;
        let id = enemy.id;
        info!(enemy = %id, name = %enemy.name, level = enemy.level, "battle started");
        self.battle.begin(enemy, self.battle_config.player_max_health);
        self.paused = true;
        self.events.push_back(LoopEvent::BattleStarted { enemy: id });
    }

    /// Apply a player action. Returns the outcome if it decided the battle.
    ///
    /// Actions after the battle is decided are ignored.
    pub fn perform_battle_action(&mut self, action: BattleAction) -> Result<Option<BattleOutcome>> {
        if !self.battle.is_in_battle() {
            return Err(EngineError::NotInBattle);
        }
        if !self.battle.is_undecided() {
            return Ok(None);
        }
        if action == BattleAction::Defend {
            self.points.restore(1);
        }
        let entry = self.battle.apply_player_action(action);
        debug!(round = entry.round, damage = entry.damage, healing = entry.healing, "player action");
        Ok(self.settle())
    }

    /// Resolve the enemy's turn. Returns the damage dealt.
    pub fn enemy_turn(&mut self) -> Result<u32> {
        if !self.battle.is_in_battle() {
            return Err(EngineError::NotInBattle);
        }
        if !self.battle.is_undecided() {
            return Ok(0);
        }
        let damage = self.battle.enemy_strike().map_or(0, |entry| entry.damage);
        debug!(round = self.battle.round, damage, "enemy turn");
        self.settle();
        Ok(damage)
    }

    fn settle(&mut self) -> Option<BattleOutcome> {
        let outcome = self.battle.check_outcome()?;
        let enemy = self.battle.enemy.as_ref().map(|e| e.id)?;
        self.battle.outcome = Some(outcome);
        match outcome {
            BattleOutcome::Victory => {
                let rewards = self.battle.victory_rewards(&self.battle_config);
                self.battle.rewards = rewards.clone();
                self.victory_countdown = Some(self.config.victory_delay);
                info!(enemy = %enemy, "battle won");
                self.events.push_back(LoopEvent::BattleVictory { enemy, rewards });
            }
            BattleOutcome::Defeat => {
                info!(enemy = %enemy, "battle lost");
                self.events.push_back(LoopEvent::BattleDefeat { enemy });
                self.end_battle();
            }
        }
        Some(outcome)
    }

    /// Leave battle and restore the pre-battle pause state. No-op outside
    /// battle.
    pub fn end_battle(&mut self) {
        if !self.battle.is_in_battle() {
            return;
        }
        let outcome = self.battle.outcome;
        self.battle.clear();
        self.victory_countdown = None;
        self.paused = self.paused_before_battle;
        if self.active && !self.paused {
            self.arm_timers();
        }
        debug!(?outcome, "battle ended");
        self.events.push_back(LoopEvent::BattleEnded { outcome });
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        TurnState {
            current_turn: self.turn,
            current_phase: self.phase,
            action_points: self.points.current(),
            max_action_points: self.points.max_points(),
            phase_time_remaining: self.phase_time_remaining,
            is_player_turn: true,
        }
    }

    #[must_use]
    pub fn loop_state(&self) -> GameLoopState {
        GameLoopState {
            is_active: self.active,
            current_phase: self.phase,
            phase_timer: self.phase_elapsed,
            phase_duration: self.config.phase_duration_secs,
            auto_advance: self.config.auto_advance,
            paused: self.paused,
        }
    }

    #[must_use]
    pub fn action_points(&self) -> &ActionPoints {
        &self.points
    }

    #[must_use]
    pub fn battle_state(&self) -> &BattleState {
        &self.battle
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_in_battle(&self) -> bool {
        self.battle.is_in_battle()
    }
}
