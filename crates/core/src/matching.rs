//! Match detection
//!
//! Rows are scanned left to right, then columns top to bottom. Each line is
//! split into maximal runs of one kind; runs of three or more are matches and
//! are consumed whole, so runs on one line never overlap. A tile found by both
//! passes is reported once.
//!
//! At most one bonus is granted per pass:
//! - **Length**: the first tile of the first run that is strictly longer than
//!   every earlier run, provided it is at least four long. Equal-length runs
//!   found later never move the anchor.
//! - **Shape**: when five or more distinct tiles match but no run reaches
//!   five, the first matched tile whose row and column each hold three or more
//!   matched tiles (an L, T or cross pivot) takes the grant instead.

use arrayvec::ArrayVec;

use crate::board::{CellMask, Grid};
use crate::types::{
    BonusKind, Position, Tile, TileId, BOARD_SIZE, BONUS_RUN_LEN, CELL_COUNT, MIN_MATCH_LEN,
    SHAPE_BONUS_LINE_MIN, SHAPE_BONUS_MAX_RUN, SHAPE_BONUS_MIN_TILES,
};

/// A bonus awarded by one detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BonusGrant {
    pub tile: TileId,
    pub position: Position,
    pub kind: BonusKind,
}

/// Result of one detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Matched tiles, de-duplicated, in discovery order
    tiles: ArrayVec<Tile, CELL_COUNT>,
    mask: CellMask,
    bonus: Option<BonusGrant>,
    longest_run: usize,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of distinct matched tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Positions of the matched tiles
    pub fn mask(&self) -> CellMask {
        self.mask
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id == id)
    }

    pub fn ids(&self) -> ArrayVec<TileId, CELL_COUNT> {
        self.tiles.iter().map(|t| t.id).collect()
    }

    pub fn bonus(&self) -> Option<BonusGrant> {
        self.bonus
    }

    /// Length of the longest matched run (0 when nothing matched)
    pub fn longest_run(&self) -> usize {
        self.longest_run
    }

    fn add(&mut self, tile: Tile) {
        if self.mask.insert(tile.position()) {
            self.tiles.push(tile);
        }
    }
}

/// Scan a grid for every run of three or more identical tiles
pub fn find_matches(grid: &Grid) -> MatchResult {
    let mut result = MatchResult::default();
    let mut length_bonus = None;

    for row in 0..BOARD_SIZE {
        let line: [Position; BOARD_SIZE] = std::array::from_fn(|col| Position::new(row, col));
        scan_line(grid, &line, &mut result, &mut length_bonus);
    }
    for col in 0..BOARD_SIZE {
        let line: [Position; BOARD_SIZE] = std::array::from_fn(|row| Position::new(row, col));
        scan_line(grid, &line, &mut result, &mut length_bonus);
    }

    result.bonus = shape_bonus(&result).or(length_bonus);
    result
}

fn scan_line(
    grid: &Grid,
    line: &[Position; BOARD_SIZE],
    result: &mut MatchResult,
    length_bonus: &mut Option<BonusGrant>,
) {
    let mut start = 0;
    while start < BOARD_SIZE {
        let Some(first) = grid.tile(line[start]).copied() else {
            start += 1;
            continue;
        };

        let mut len = 1;
        while start + len < BOARD_SIZE
            && grid.tile(line[start + len]).map(|t| t.kind) == Some(first.kind)
        {
            len += 1;
        }

        if len >= MIN_MATCH_LEN {
            for pos in &line[start..start + len] {
                if let Some(tile) = grid.tile(*pos) {
                    result.add(*tile);
                }
            }
            if len > result.longest_run {
                result.longest_run = len;
                if len >= BONUS_RUN_LEN {
                    *length_bonus = Some(grant(&first));
                }
            }
        }

        start += len;
    }
}

fn shape_bonus(result: &MatchResult) -> Option<BonusGrant> {
    if result.len() < SHAPE_BONUS_MIN_TILES || result.longest_run >= SHAPE_BONUS_MAX_RUN {
        return None;
    }
    result
        .tiles
        .iter()
        .find(|pivot| {
            let row_mates = result.tiles.iter().filter(|t| t.row == pivot.row).count();
            let col_mates = result.tiles.iter().filter(|t| t.col == pivot.col).count();
            row_mates >= SHAPE_BONUS_LINE_MIN && col_mates >= SHAPE_BONUS_LINE_MIN
        })
        .map(grant)
}

fn grant(tile: &Tile) -> BonusGrant {
    BonusGrant {
        tile: tile.id,
        position: tile.position(),
        kind: BonusKind::Bomb,
    }
}
