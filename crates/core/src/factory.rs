//! Board generation
//!
//! A fresh board is filled uniformly at random, then every tile taking part in
//! a match is replaced in place by a new random tile until no match is left.
//! Both loops are bounded; if the random source never settles, a fixed
//! match-free pattern is used instead.

use log::{debug, warn};
use rand::Rng;

use crate::board::Grid;
use crate::matching::find_matches;
use crate::moves::has_valid_moves;
use crate::rng::{fresh_tile, TileIdSource};
use crate::types::{
    Position, Tile, TileKind, MAX_GENERATION_ATTEMPTS, MAX_RESHUFFLE_ATTEMPTS, MAX_STABILIZE_PASSES,
    TILE_KIND_COUNT,
};

/// Generate a full board with no matches. Rewinds `ids`.
pub fn generate_board<R: Rng + ?Sized>(rng: &mut R, ids: &TileIdSource) -> Grid {
    ids.reset();

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let mut grid = Grid::new();
        for pos in Grid::positions() {
            grid.place(pos, fresh_tile(rng, ids, pos));
        }

        for _ in 0..MAX_STABILIZE_PASSES {
            let matches = find_matches(&grid);
            if matches.is_empty() {
                return grid;
            }
            for tile in matches.tiles() {
                let pos = tile.position();
                grid.place(pos, fresh_tile(rng, ids, pos));
            }
        }

        debug!("board generation attempt {} did not settle", attempt);
    }

    warn!(
        "board generation did not settle after {} attempts, using fallback pattern",
        MAX_GENERATION_ATTEMPTS
    );
    fallback_board(ids)
}

/// Generate a board with no matches and at least one valid move
pub fn generate_playable_board<R: Rng + ?Sized>(rng: &mut R, ids: &TileIdSource) -> Grid {
    let mut grid = generate_board(rng, ids);
    for attempt in 1..MAX_RESHUFFLE_ATTEMPTS {
        if has_valid_moves(&grid) {
            return grid;
        }
        debug!("generated board {} is deadlocked, regenerating", attempt);
        grid = generate_board(rng, ids);
    }
    if !has_valid_moves(&grid) {
        warn!(
            "no playable board after {} attempts, keeping a deadlocked one",
            MAX_RESHUFFLE_ATTEMPTS
        );
    }
    grid
}

/// Kind index `(row + 2 * col) % 5`: horizontal neighbors differ by 2 and
/// vertical neighbors by 1, so no run can form. That lattice alone has no
/// valid move, so (0, 1) repeats the kind of (0, 0); swapping (0, 2) with
/// (1, 2) then completes a run on the top row.
fn fallback_board(ids: &TileIdSource) -> Grid {
    let mut grid = Grid::new();
    for pos in Grid::positions() {
        let index = if pos == Position::new(0, 1) {
            0
        } else {
            (pos.row + 2 * pos.col) % TILE_KIND_COUNT
        };
        let kind = TileKind::ALL[index];
        grid.place(pos, Tile::new(ids.issue(), kind, pos));
    }
    grid
}
