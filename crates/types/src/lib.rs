//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, session bookkeeping, presentation layers).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Size**: 8 rows x 8 columns (indexed 0-7)
//! - **Coordinates**: `(row, col)` with row 0 at the top
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_MATCH_LEN` | 3 | Shortest run that counts as a match |
//! | `BONUS_RUN_LEN` | 4 | Shortest run that grants a bonus tile |
//! | `SHAPE_BONUS_MIN_TILES` | 5 | Distinct matched tiles needed for a shape bonus |
//! | `SHAPE_BONUS_LINE_MIN` | 3 | Matched tiles needed in both the row and column of a shape pivot |
//! | `POINTS_PER_TILE` | 10 | Base points per matched tile, times the cascade step |
//!
//! # Examples
//!
//! ```
//! use gemfall_types::{Position, TileKind, BOARD_SIZE};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(TileKind::from_str("RED"), Some(TileKind::Red));
//!
//! // Adjacency is orthogonal only
//! let a = Position::new(3, 3);
//! assert!(a.is_adjacent(Position::new(3, 4)));
//! assert!(!a.is_adjacent(Position::new(4, 4)));
//!
//! assert_eq!(BOARD_SIZE, 8);
//! ```

/// Board side length in cells (8x8)
pub const BOARD_SIZE: usize = 8;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of distinct tile kinds
pub const TILE_KIND_COUNT: usize = 5;

/// Shortest straight run of identical tiles that forms a match
pub const MIN_MATCH_LEN: usize = 3;

/// Shortest straight run that grants a bonus tile
pub const BONUS_RUN_LEN: usize = 4;

/// Run length from which the shape bonus no longer overrides the length bonus
pub const SHAPE_BONUS_MAX_RUN: usize = 5;

/// Distinct matched tiles required before a shape bonus is considered
pub const SHAPE_BONUS_MIN_TILES: usize = 5;

/// Matched tiles required in both the row and the column of a shape pivot
pub const SHAPE_BONUS_LINE_MIN: usize = 3;

/// Base points per matched tile (multiplied by the 1-based cascade step)
pub const POINTS_PER_TILE: u32 = 10;

/// Upper bound on cascade passes for a single player action
pub const MAX_CASCADE_STEPS: usize = 64;

/// Upper bound on match-removal passes while stabilizing a fresh board
pub const MAX_STABILIZE_PASSES: usize = 256;

/// Upper bound on full restarts while generating a board
pub const MAX_GENERATION_ATTEMPTS: usize = 32;

/// Upper bound on regenerations while looking for a board with a legal move
pub const MAX_RESHUFFLE_ATTEMPTS: usize = 64;

/// The five tile kinds
///
/// Each kind is one color of gem. Kinds only matter for equality: a run of
/// three or more identical kinds along a row or column is a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl TileKind {
    /// Every kind, in index order
    pub const ALL: [TileKind; TILE_KIND_COUNT] = [
        TileKind::Red,
        TileKind::Blue,
        TileKind::Green,
        TileKind::Yellow,
        TileKind::Purple,
    ];

    /// Kind at `index` in [`TileKind::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this kind in [`TileKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            TileKind::Red => 0,
            TileKind::Blue => 1,
            TileKind::Green => 2,
            TileKind::Yellow => 3,
            TileKind::Purple => 4,
        }
    }

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gemfall_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("blue"), Some(TileKind::Blue));
    /// assert_eq!(TileKind::from_str("Purple"), Some(TileKind::Purple));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileKind::Red),
            "blue" => Some(TileKind::Blue),
            "green" => Some(TileKind::Green),
            "yellow" => Some(TileKind::Yellow),
            "purple" => Some(TileKind::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Blue => "blue",
            TileKind::Green => "green",
            TileKind::Yellow => "yellow",
            TileKind::Purple => "purple",
        }
    }

    /// Single-letter glyph used by text dumps of the board
    pub fn glyph(&self) -> char {
        match self {
            TileKind::Red => 'R',
            TileKind::Blue => 'B',
            TileKind::Green => 'G',
            TileKind::Yellow => 'Y',
            TileKind::Purple => 'P',
        }
    }
}

/// Bonus carried by a tile
///
/// Only `Bomb` has defined activation behavior (clears the surrounding 3x3
/// area). The remaining kinds are declared so that grids carrying them can be
/// represented; activating them is reported as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusKind {
    Bomb,
    RowClear,
    ColumnClear,
    Rainbow,
}

impl BonusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BonusKind::Bomb => "bomb",
            BonusKind::RowClear => "row_clear",
            BonusKind::ColumnClear => "column_clear",
            BonusKind::Rainbow => "rainbow",
        }
    }
}

/// Process-unique tile identifier
///
/// Issued once when a tile is created and never reused for the lifetime of
/// a board. It survives swaps and cascades until the tile is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this position lies on the board
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// True iff exactly one coordinate differs, and by exactly one
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }

    /// Flat row-major index (row * BOARD_SIZE + col)
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// The position one column to the right, if on the board
    pub fn right(&self) -> Option<Position> {
        let next = Position::new(self.row, self.col + 1);
        next.in_bounds().then_some(next)
    }

    /// The position one row below, if on the board
    pub fn below(&self) -> Option<Position> {
        let next = Position::new(self.row + 1, self.col);
        next.in_bounds().then_some(next)
    }
}

/// A single gem on the board
///
/// `row`/`col` mirror the cell the tile occupies. The grid keeps them in
/// sync on every mutation; nothing else should write them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub row: usize,
    pub col: usize,
    pub bonus: Option<BonusKind>,
}

impl Tile {
    /// Create a plain tile (no bonus) at the given position
    pub fn new(id: TileId, kind: TileKind, pos: Position) -> Self {
        Self {
            id,
            kind,
            row: pos.row,
            col: pos.col,
            bonus: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// A cell on the board
///
/// - `Empty`: no tile (transient, between clearing and refill)
/// - `Occupied(Tile)`: cell holds the given tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Tile),
}

impl Cell {
    pub fn tile(&self) -> Option<&Tile> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(tile) => Some(tile),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Tile kind, if occupied
    pub fn kind(&self) -> Option<TileKind> {
        self.tile().map(|t| t.kind)
    }
}
