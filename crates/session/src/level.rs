//! Level bookkeeping: move budget, score against target, outcome
//!
//! The board engine never sees any of this. The session feeds each committed
//! move's score delta into [`LevelState::record_move`], which finalizes the
//! outcome exactly once.

use serde::Serialize;

use crate::error::SuggestionError;

/// Fewest moves a level may grant
pub const MIN_MOVES: u32 = 10;
/// Most moves a level may grant
pub const MAX_MOVES: u32 = 35;
pub const FIRST_LEVEL_MOVES: u32 = 30;
pub const FIRST_LEVEL_TARGET: u32 = 1000;
/// Target increase per level under the fallback policy
pub const TARGET_STEP: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_finished(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Move budget and target for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    pub moves: u32,
    pub target_score: u32,
}

impl LevelParams {
    /// Validate parameters that came from outside the fallback policy
    pub fn checked(moves: u32, target_score: u32) -> Result<Self, SuggestionError> {
        if !(MIN_MOVES..=MAX_MOVES).contains(&moves) {
            return Err(SuggestionError::MovesOutOfRange(moves));
        }
        if target_score == 0 {
            return Err(SuggestionError::ZeroTarget);
        }
        Ok(Self {
            moves,
            target_score,
        })
    }
}

/// State of the level being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    pub level: u32,
    pub score: u32,
    pub target_score: u32,
    pub moves_remaining: u32,
    pub outcome: Outcome,
    /// Longest cascade chain seen this level
    pub highest_combo: u32,
}

impl LevelState {
    pub fn new(level: u32, params: LevelParams) -> Self {
        Self {
            level,
            score: 0,
            target_score: params.target_score,
            moves_remaining: params.moves,
            outcome: Outcome::InProgress,
            highest_combo: 0,
        }
    }

    /// Commit one successful move.
    ///
    /// Returns the outcome if this move finished the level. Reaching the
    /// target on the last move counts as a win.
    pub fn record_move(&mut self, score_delta: u32, combo: u32) -> Option<Outcome> {
        if self.outcome.is_finished() {
            return None;
        }

        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.score = self.score.saturating_add(score_delta);
        self.highest_combo = self.highest_combo.max(combo);

        if self.score >= self.target_score {
            self.outcome = Outcome::Won;
        } else if self.moves_remaining == 0 {
            self.outcome = Outcome::Lost;
        }
        self.outcome.is_finished().then_some(self.outcome)
    }
}

/// What a parameter provider is told about the level just played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextLevelRequest {
    pub current_level: u32,
    pub current_score: u32,
    pub moves_remaining: u32,
    pub highest_combo: u32,
    pub did_win: bool,
    pub target_score: u32,
}

impl From<&LevelState> for NextLevelRequest {
    fn from(state: &LevelState) -> Self {
        Self {
            current_level: state.level,
            current_score: state.score,
            moves_remaining: state.moves_remaining,
            highest_combo: state.highest_combo,
            did_win: state.outcome == Outcome::Won,
            target_score: state.target_score,
        }
    }
}
