use thiserror::Error;

use crate::game::GameState;

/// Errors raised by games and the scoreboard façade.
///
/// The index itself never fails; these come from game construction,
/// illegal lifecycle actions, and identity-pair lookups in the manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Malformed construction input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The action is not legal in the game's current state.
    #[error("cannot {action} a game that is {state}")]
    UnsupportedTransition { action: &'static str, state: GameState },

    /// No tracked game matches the requested pair.
    #[error("no game tracked for {home} vs {away}")]
    NotFound { home: String, away: String },

    /// The pair is already playing on the scoreboard.
    #[error("a game for {home} vs {away} is already tracked")]
    GameAlreadyTracked { home: String, away: String },
}

impl GameError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
