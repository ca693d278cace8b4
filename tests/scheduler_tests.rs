//! Scheduler tests.
//!
//! These tests drive the scheduler through its public clock:
//! - The phase cycle and per-turn refill
//! - Timers under pause and battle
//! - The battle lifecycle from start to reward

use std::time::Duration;

use proptest::prelude::*;
use wealth_guardians::core::{ActionPointConfig, EngineConfig, GameRng, LoopConfig};
use wealth_guardians::encounter::EncounterGenerator;
use wealth_guardians::scheduler::{
    ActionPoints, BattleAction, BattleOutcome, GamePhase, LoopEvent, RewardKind, TurnScheduler,
};

fn scheduler_with(game_loop: LoopConfig) -> TurnScheduler {
    TurnScheduler::from_config(&EngineConfig::default().with_loop(game_loop))
}

/// Test that six advances return to Prepare.
#[test]
fn test_six_advances_cycle() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    for _ in 0..6 {
        scheduler.advance_phase();
    }
    assert_eq!(scheduler.phase(), GamePhase::Prepare);

    let phases: Vec<GamePhase> = scheduler
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            LoopEvent::PhaseEntered { phase } => Some(phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            GamePhase::Draw,
            GamePhase::Action,
            GamePhase::Event,
            GamePhase::Resolution,
            GamePhase::Reward,
            GamePhase::Prepare,
        ]
    );
}

/// Test a full auto-advancing turn driven by the clock alone.
#[test]
fn test_auto_advance_full_cycle() {
    let mut scheduler =
        scheduler_with(LoopConfig::default().with_phase_duration(3).with_auto_advance(true));
    scheduler.start();

    for _ in 0..18 {
        scheduler.tick(Duration::from_secs(1));
    }
    assert_eq!(scheduler.phase(), GamePhase::Prepare);
}

/// Test that the timeout signal fires once per phase.
#[test]
fn test_timeout_fires_once() {
    let mut scheduler = scheduler_with(LoopConfig::default().with_phase_duration(2));
    scheduler.start();
    scheduler.tick(Duration::from_secs(10));

    let timeouts = scheduler
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, LoopEvent::PhaseTimedOut { .. }))
        .count();
    assert_eq!(timeouts, 1);
    assert_eq!(scheduler.turn_state().phase_time_remaining, 0);

    // A new phase re-arms the signal
    scheduler.advance_phase();
    scheduler.tick(Duration::from_secs(2));
    assert!(scheduler
        .drain_events()
        .contains(&LoopEvent::PhaseTimedOut { phase: GamePhase::Draw }));
}

/// Test that a battle freezes the phase clock but not the victory delay.
#[test]
fn test_battle_freezes_phase_clock() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    scheduler.start();
    scheduler.tick(Duration::from_secs(4));
    assert_eq!(scheduler.turn_state().phase_time_remaining, 26);

    let enemy = EncounterGenerator::new(GameRng::new(3)).normal_enemy(2, Some("recession"));
    scheduler.start_battle(enemy);
    scheduler.tick(Duration::from_secs(10));
    assert_eq!(scheduler.turn_state().phase_time_remaining, 26);

    scheduler
        .perform_battle_action(BattleAction::Attack { damage: 1_000, card_id: None })
        .unwrap();
    scheduler.tick(Duration::from_secs(3));
    assert!(!scheduler.is_in_battle());

    scheduler.tick(Duration::from_secs(1));
    assert_eq!(scheduler.turn_state().phase_time_remaining, 25);
}

/// Test that resuming or restarting during a battle does not unfreeze the loop.
#[test]
fn test_battle_freeze_survives_resume_and_start() {
    for restart in [false, true] {
        let mut scheduler = scheduler_with(LoopConfig::default());
        scheduler.start();
        assert!(scheduler.use_action_points(3));

        let enemy = EncounterGenerator::new(GameRng::new(3)).normal_enemy(1, None);
        scheduler.start_battle(enemy);
        if restart {
            scheduler.start();
        } else {
            scheduler.resume();
        }
        scheduler.tick(Duration::from_secs(10));

        assert!(scheduler.is_in_battle());
        assert!(scheduler.is_paused());
        assert_eq!(scheduler.action_points().current(), 2);
        assert_eq!(scheduler.turn_state().phase_time_remaining, 30);

        scheduler.end_battle();
        assert!(!scheduler.is_paused());
        scheduler.tick(Duration::from_secs(5));
        assert_eq!(scheduler.action_points().current(), 3);
    }
}

/// Test that a pause issued mid-battle outlasts the victory delay.
#[test]
fn test_pause_during_battle_outlasts_victory() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    scheduler.start();
    let enemy = EncounterGenerator::new(GameRng::new(3)).normal_enemy(1, None);
    scheduler.start_battle(enemy);
    scheduler.pause();

    scheduler
        .perform_battle_action(BattleAction::Attack { damage: 1_000, card_id: None })
        .unwrap();
    scheduler.tick(Duration::from_secs(3));

    assert!(!scheduler.is_in_battle());
    assert!(scheduler.is_paused());
    assert!(scheduler.loop_state().paused);
}

/// Test that a redundant resume keeps partial regeneration progress.
#[test]
fn test_resume_keeps_regen_progress() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    scheduler.start();
    assert!(scheduler.use_action_points(3));

    scheduler.tick(Duration::from_secs(4));
    scheduler.resume();
    scheduler.tick(Duration::from_secs(1));
    assert_eq!(scheduler.action_points().current(), 3);

    // Pausing keeps the partial period too
    scheduler.tick(Duration::from_secs(4));
    scheduler.pause();
    scheduler.tick(Duration::from_secs(30));
    scheduler.resume();
    scheduler.tick(Duration::from_secs(1));
    assert_eq!(scheduler.action_points().current(), 4);
}

/// Test rewards scale with enemy level.
#[test]
fn test_rewards_scale_with_level() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    let enemy = EncounterGenerator::new(GameRng::new(3))
        .boss_enemy(5, Some("market_crash"))
        .unwrap();
    scheduler.start_battle(enemy);
    scheduler
        .perform_battle_action(BattleAction::Attack { damage: 10_000, card_id: None })
        .unwrap();

    let rewards = &scheduler.battle_state().rewards;
    let coins = rewards.iter().find(|r| r.kind == RewardKind::Coins).unwrap();
    let exp = rewards.iter().find(|r| r.kind == RewardKind::Experience).unwrap();
    assert_eq!(coins.amount, 50);
    assert_eq!(exp.amount, 25);
}

/// Test a slugging match decided by attack damage minus defense.
#[test]
fn test_attack_damage_floor() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    let enemy = EncounterGenerator::new(GameRng::new(3)).normal_enemy(1, None);
    let defense = enemy.defense;
    let health = enemy.max_health;
    scheduler.start_battle(enemy);

    scheduler
        .perform_battle_action(BattleAction::Attack { damage: defense + 4, card_id: None })
        .unwrap();
    assert_eq!(scheduler.battle_state().enemy_health, health - 4);

    scheduler
        .perform_battle_action(BattleAction::Attack { damage: 0, card_id: None })
        .unwrap();
    assert_eq!(scheduler.battle_state().enemy_health, health - 5);
}

/// Test that enemy turns advance the round and lead to defeat.
#[test]
fn test_enemy_turns_to_defeat() {
    let mut scheduler = scheduler_with(LoopConfig::default());
    let enemy = EncounterGenerator::new(GameRng::new(3))
        .boss_enemy(10, Some("financial_crisis"))
        .unwrap();
    scheduler.start_battle(enemy);

    let first = scheduler.enemy_turn().unwrap();
    assert!(first > 0);
    assert_eq!(scheduler.battle_state().round, 2);

    while scheduler.is_in_battle() {
        scheduler.enemy_turn().unwrap();
    }
    let events = scheduler.drain_events();
    assert!(events.iter().any(|e| matches!(e, LoopEvent::BattleDefeat { .. })));
    assert!(events.contains(&LoopEvent::BattleEnded { outcome: Some(BattleOutcome::Defeat) }));
}

proptest! {
    /// Points never go negative and `use_points` agrees with `has_enough`.
    #[test]
    fn prop_action_points(max in 0u32..10, ops in proptest::collection::vec((any::<bool>(), 0u32..8), 0..50)) {
        let mut points = ActionPoints::new(&ActionPointConfig::default().with_max_points(max));
        for (spend, amount) in ops {
            if spend {
                let allowed = points.has_enough(amount);
                let before = points.current();
                prop_assert_eq!(points.use_points(amount), allowed);
                if !allowed {
                    prop_assert_eq!(points.current(), before);
                }
            } else {
                points.restore(amount);
            }
            prop_assert!(points.current() <= points.max_points());
        }
    }

    /// The phase clock stays within [0, duration] under any tick pattern.
    #[test]
    fn prop_phase_clock_bounded(duration in 1u32..20, auto in any::<bool>(), ticks in proptest::collection::vec(0u64..5000, 0..40)) {
        let mut scheduler = scheduler_with(
            LoopConfig::default().with_phase_duration(duration).with_auto_advance(auto),
        );
        scheduler.start();
        for millis in ticks {
            scheduler.tick(Duration::from_millis(millis));
            let state = scheduler.turn_state();
            prop_assert!(state.phase_time_remaining <= duration);
            prop_assert!(state.action_points <= state.max_action_points);
        }
    }
}
