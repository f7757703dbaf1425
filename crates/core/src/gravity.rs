//! Gravity and refill
//!
//! Gravity compacts every column toward the bottom without reordering tiles;
//! refill then drops a fresh random tile into every remaining hole. Refill
//! does not look for matches: new matches are the next cascade pass's job.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::board::Grid;
use crate::rng::{fresh_tile, TileIdSource};
use crate::types::{Position, TileId, BOARD_SIZE, CELL_COUNT};

/// Result of one gravity pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityResult {
    pub grid: Grid,
    /// Tiles whose row changed, column by column, bottom to top
    pub moved: ArrayVec<TileId, CELL_COUNT>,
}

/// Shift every tile down to the lowest free cell of its column
///
/// Uses a two-pointer scan per column: reading bottom to top, each tile is
/// written at the write cursor, which then moves up one row.
pub fn apply_gravity(grid: &Grid) -> GravityResult {
    let mut settled = Grid::new();
    let mut moved = ArrayVec::new();

    for col in 0..BOARD_SIZE {
        let mut write_row = BOARD_SIZE;
        for read_row in (0..BOARD_SIZE).rev() {
            let Some(tile) = grid.tile(Position::new(read_row, col)) else {
                continue;
            };
            write_row -= 1;
            if write_row != read_row {
                moved.push(tile.id);
            }
            settled.place(Position::new(write_row, col), *tile);
        }
    }

    GravityResult {
        grid: settled,
        moved,
    }
}

/// Fill every empty cell with a freshly identified random tile
pub fn refill<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, ids: &TileIdSource) -> Grid {
    let mut filled = *grid;
    for pos in Grid::positions() {
        if !filled.is_occupied(pos) {
            filled.place(pos, fresh_tile(rng, ids, pos));
        }
    }
    filled
}
