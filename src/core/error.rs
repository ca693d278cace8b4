//! Engine error type.
//!
//! Only genuine faults surface here: unknown content references and
//! undecodable save data. Running out of cards, action points or coins is
//! reported through partial results or `bool` refusals instead.

use thiserror::Error;

/// Errors reported by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An explicit boss template tag that is not in the template table.
    #[error("unknown boss template: {0}")]
    UnknownBossTemplate(String),

    /// A template tag lookup that matched nothing.
    #[error("unknown enemy template: {0}")]
    UnknownEnemyTemplate(String),

    /// A battle operation was issued outside a battle.
    #[error("no battle in progress")]
    NotInBattle,

    /// Save data could not be encoded.
    #[error("failed to encode save data: {0}")]
    SaveEncode(#[source] bincode::Error),

    /// Save data could not be decoded.
    #[error("failed to decode save data: {0}")]
    SaveDecode(#[source] bincode::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::UnknownBossTemplate("dragon".to_string());
        assert_eq!(err.to_string(), "unknown boss template: dragon");
        assert_eq!(EngineError::NotInBattle.to_string(), "no battle in progress");
    }
}
