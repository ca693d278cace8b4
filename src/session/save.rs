//! Save snapshots.
//!
//! A `SaveGame` carries what outlives a session: the player (with their
//! portfolio), the settings, the market and the positions of the random
//! streams. Decks are not saved; a loaded session deals from piles
//! shuffled by the resumed deck stream. There is no versioning, the last
//! write wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::player::PlayerState;
use crate::cards::MarketCondition;
use crate::core::{EngineConfig, EngineError, GameRngState, Result};

/// Where each of the session's random streams had got to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngStreams {
    pub deck: GameRngState,
    pub market: GameRngState,
    pub encounter: GameRngState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub player: PlayerState,
    pub settings: EngineConfig,
    pub market: MarketCondition,
    pub turn: u32,
    pub streams: RngStreams,
}

impl SaveGame {
    /// Encode to bytes with bincode.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let bytes = bincode::serialize(self).map_err(EngineError::SaveEncode)?;
        debug!(bytes = bytes.len(), "save encoded");
        Ok(bytes)
    }

    /// Decode bytes produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let save: Self = bincode::deserialize(bytes).map_err(EngineError::SaveDecode)?;
        debug!(bytes = bytes.len(), turn = save.turn, "save decoded");
        Ok(save)
    }
}
