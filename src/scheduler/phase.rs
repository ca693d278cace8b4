//! Turn phases.

use serde::{Deserialize, Serialize};

/// Phases of a turn, in order. The cycle wraps from `Reward` to `Prepare`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Prepare,
    Draw,
    Action,
    Event,
    Resolution,
    Reward,
}

impl GamePhase {
    pub const ALL: [GamePhase; 6] = [
        GamePhase::Prepare,
        GamePhase::Draw,
        GamePhase::Action,
        GamePhase::Event,
        GamePhase::Resolution,
        GamePhase::Reward,
    ];

    /// The phase after this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            GamePhase::Prepare => GamePhase::Draw,
            GamePhase::Draw => GamePhase::Action,
            GamePhase::Action => GamePhase::Event,
            GamePhase::Event => GamePhase::Resolution,
            GamePhase::Resolution => GamePhase::Reward,
            GamePhase::Reward => GamePhase::Prepare,
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Prepare => "prepare",
            GamePhase::Draw => "draw",
            GamePhase::Action => "action",
            GamePhase::Event => "event",
            GamePhase::Resolution => "resolution",
            GamePhase::Reward => "reward",
        };
        f.write_str(name)
    }
}
