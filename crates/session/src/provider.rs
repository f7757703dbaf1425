//! Next-level parameter providers
//!
//! [`FallbackPolicy`] is deterministic and always available. [`SuggestionProvider`]
//! asks an external text source and parses its answer; any failure there is
//! reported as a [`ProviderError`] so the session can fall back.

use log::debug;

use crate::error::ProviderError;
use crate::level::{
    LevelParams, NextLevelRequest, FIRST_LEVEL_MOVES, FIRST_LEVEL_TARGET, MAX_MOVES, MIN_MOVES,
    TARGET_STEP,
};
use crate::suggestion::parse_suggestion;

pub trait LevelParamsProvider {
    /// Parameters for level `request.current_level + 1`
    fn next_params(&mut self, request: &NextLevelRequest) -> Result<LevelParams, ProviderError>;
}

/// Offline difficulty curve: one move fewer and `TARGET_STEP` more points per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackPolicy;

impl FallbackPolicy {
    /// Parameters for a 1-based level number (0 is treated as 1)
    pub fn params_for(&self, level: u32) -> LevelParams {
        let steps = level.max(1) - 1;
        let moves = FIRST_LEVEL_MOVES
            .saturating_sub(steps)
            .clamp(MIN_MOVES, MAX_MOVES);
        let target_score = FIRST_LEVEL_TARGET.saturating_add(TARGET_STEP.saturating_mul(steps));
        LevelParams {
            moves,
            target_score,
        }
    }
}

impl LevelParamsProvider for FallbackPolicy {
    fn next_params(&mut self, request: &NextLevelRequest) -> Result<LevelParams, ProviderError> {
        Ok(self.params_for(request.current_level.saturating_add(1)))
    }
}

/// Provider backed by a text source answering in the suggestion schema.
///
/// The source receives the request serialized as JSON and returns raw text.
pub struct SuggestionProvider<F> {
    source: F,
}

impl<F> SuggestionProvider<F>
where
    F: FnMut(&str) -> anyhow::Result<String>,
{
    pub fn new(source: F) -> Self {
        Self { source }
    }
}

impl<F> LevelParamsProvider for SuggestionProvider<F>
where
    F: FnMut(&str) -> anyhow::Result<String>,
{
    fn next_params(&mut self, request: &NextLevelRequest) -> Result<LevelParams, ProviderError> {
        let prompt = serde_json::to_string(request)
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        let answer =
            (self.source)(&prompt).map_err(|e| ProviderError::Unavailable(format!("{:#}", e)))?;
        debug!("level suggestion for level {}: {}", request.current_level + 1, answer.trim());
        Ok(parse_suggestion(&answer)?)
    }
}
