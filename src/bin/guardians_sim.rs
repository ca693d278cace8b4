//! Headless simulation: plays a number of turns with a simple policy and
//! prints the resulting portfolio.
//!
//! ```text
//! guardians-sim --seed 42 --turns 10
//! RUST_LOG=debug guardians-sim --battle-every 2
//! ```

use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wealth_guardians::{BattleAction, EngineConfig, GamePhase, GameSession, Result};

#[derive(Debug, Parser)]
#[command(name = "guardians-sim", version, about = "Play a seeded investment game headlessly")]
struct Args {
    /// Master seed. Omit for an entropy-seeded run.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to play.
    #[arg(long, default_value_t = 5)]
    turns: u32,

    /// Fight an encounter every N turns; 0 disables battles.
    #[arg(long, default_value_t = 3)]
    battle_every: u32,
}

/// Buy the cheapest affordable assets, then play any skill that applies.
fn action_phase(session: &mut GameSession) {
    let mut assets = session.hand().assets.into_vec();
    assets.sort_by_key(|c| c.cost);
    for card in assets {
        session.buy_asset(card.id, 1);
    }
    for skill in session.hand().skills {
        session.play_skill(skill.id);
    }
}

/// Fight until the battle is decided.
fn battle(session: &mut GameSession) -> Result<()> {
    session.start_encounter();
    while session.battle_state().is_undecided() {
        session.battle_action(BattleAction::Attack { damage: 30, card_id: None })?;
        if session.battle_state().is_undecided() {
            session.enemy_turn()?;
        }
    }
    // Let the victory delay run out
    session.tick(Duration::from_secs(3));
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Args {
        seed,
        turns,
        battle_every,
    } = Args::parse();
    let config = match seed {
        Some(seed) => EngineConfig::default().with_seed(seed),
        None => EngineConfig::default(),
    };
    let mut session = GameSession::new(config);
    session.start();
    info!(?seed, turns, "simulation started");

    for turn in 1..=turns {
        for _ in 0..GamePhase::ALL.len() - 1 {
            session.advance_phase();
            if session.turn_state().current_phase == GamePhase::Action {
                action_phase(&mut session);
            }
        }
        if battle_every > 0 && turn % battle_every == 0 {
            battle(&mut session)?;
        }
        for line in session.drain_log() {
            info!("{line}");
        }
        session.start_new_turn();
    }
    session.stop();

    let portfolio = session.portfolio();
    println!(
        "Turns: {} | market: {:?} | coins: {} | level: {}",
        turns,
        session.market(),
        session.player().coins(),
        session.player().level()
    );
    println!(
        "Portfolio | holdings: {} | value: {:.2} | cost: {:.2} | risk: {} | diversification: {}",
        portfolio.len(),
        portfolio.total_value(),
        portfolio.total_cost(),
        session.portfolio_risk(),
        session.diversification_score()
    );
    for position in portfolio.iter() {
        println!(
            "  {:<16} x{:<3} value {:>8.2} return {:>6.2}%",
            position.card.name, position.quantity, position.current_value, position.period_return
        );
    }
    Ok(())
}
