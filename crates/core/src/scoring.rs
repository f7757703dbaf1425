//! Scoring module - cascade scoring rules
//!
//! Every cascade pass scores `tiles * POINTS_PER_TILE * step`, where `step` is
//! the 1-based index of the pass within the chain started by one player action.
//! The multiplier therefore grows by one with each consecutive pass.

use crate::types::POINTS_PER_TILE;

/// Points for one cascade pass.
/// tiles: tiles removed by the pass
/// step: 1-based position of the pass in its chain
pub fn cascade_step_score(tiles: usize, step: u32) -> u32 {
    (tiles as u32)
        .saturating_mul(POINTS_PER_TILE)
        .saturating_mul(step)
}

/// Total for a chain of passes, given each pass's tile count in order
pub fn cascade_total(pass_sizes: &[usize]) -> u32 {
    pass_sizes
        .iter()
        .zip(1u32..)
        .map(|(&tiles, step)| cascade_step_score(tiles, step))
        .fold(0u32, u32::saturating_add)
}
