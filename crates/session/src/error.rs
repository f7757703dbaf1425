use std::io;

use thiserror::Error;

use gemfall_core::{PowerUpError, SwapError};

use crate::level::{Outcome, MAX_MOVES, MIN_MOVES};

/// Rejected session operation. The board and level state are unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Swap(#[from] SwapError),
    #[error(transparent)]
    PowerUp(#[from] PowerUpError),
    #[error("level already finished ({0:?})")]
    LevelOver(Outcome),
    #[error("level has not been won yet")]
    LevelNotWon,
    #[error("player name is empty")]
    EmptyName,
}

impl SessionError {
    pub fn code(self) -> &'static str {
        match self {
            SessionError::Swap(err) => err.code(),
            SessionError::PowerUp(err) => err.code(),
            SessionError::LevelOver(_) => "level_over",
            SessionError::LevelNotWon => "level_not_won",
            SessionError::EmptyName => "empty_name",
        }
    }
}

/// A level suggestion that cannot be used as-is
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("malformed suggestion: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no JSON object in suggestion text")]
    MissingObject,
    #[error("suggested moves {0} outside {min}..={max}", min = MIN_MOVES, max = MAX_MOVES)]
    MovesOutOfRange(u32),
    #[error("suggested target score must be positive")]
    ZeroTarget,
}

/// Failure of a next-level parameter provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("level provider unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file: {0}")]
    Io(#[from] io::Error),
    #[error("high score encoding: {0}")]
    Format(#[from] serde_json::Error),
}
