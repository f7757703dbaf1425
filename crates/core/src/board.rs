//! Board module - manages the game grid
//!
//! The grid is an 8x8 square where each cell is either empty or holds a tile.
//! Uses a flat array for better cache locality; the whole grid is `Copy`, so
//! every transformation can take a grid by reference and hand back a new one.
//! Coordinates: `(row, col)`, row 0 at the top, both ranging 0..8.

use std::fmt;

use crate::types::{BonusKind, Cell, Position, Tile, TileId, TileKind, BOARD_SIZE, CELL_COUNT};

/// The game grid - 8 rows x 8 columns using flat array storage
///
/// Invariant: every occupied cell at `(r, c)` holds a tile whose `row`/`col`
/// equal `(r, c)`. All writes go through [`Grid::set`], which enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Position) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some(pos.index())
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Every position in row-major order
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Tile at position, if in bounds and occupied
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        Self::index(pos).and_then(|idx| self.cells[idx].tile())
    }

    /// Set cell at position, rewriting the occupant's row/col to match.
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = match cell {
                    Cell::Empty => Cell::Empty,
                    Cell::Occupied(mut tile) => {
                        tile.row = pos.row;
                        tile.col = pos.col;
                        Cell::Occupied(tile)
                    }
                };
                true
            }
            None => false,
        }
    }

    /// Put a tile at position (see [`Grid::set`])
    pub fn place(&mut self, pos: Position, tile: Tile) -> bool {
        self.set(pos, Cell::Occupied(tile))
    }

    /// Remove and return the tile at position
    pub fn take(&mut self, pos: Position) -> Option<Tile> {
        let idx = Self::index(pos)?;
        match std::mem::take(&mut self.cells[idx]) {
            Cell::Empty => None,
            Cell::Occupied(tile) => Some(tile),
        }
    }

    /// Exchange the contents of two cells.
    /// Returns false (and leaves the grid untouched) if either is out of bounds
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(a_cell), Some(b_cell)) = (self.get(a), self.get(b)) else {
            return false;
        };
        self.set(a, b_cell);
        self.set(b, a_cell);
        true
    }

    /// Tag (or untag) the tile at position with a bonus.
    /// Returns false if the cell is empty or out of bounds
    pub fn set_bonus(&mut self, pos: Position, bonus: Option<BonusKind>) -> bool {
        let Some(idx) = Self::index(pos) else {
            return false;
        };
        match &mut self.cells[idx] {
            Cell::Occupied(tile) => {
                tile.bonus = bonus;
                true
            }
            Cell::Empty => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile(pos).is_some()
    }

    /// Check if every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn empty_count(&self) -> usize {
        CELL_COUNT - self.occupied_count()
    }

    /// Empty every cell in `mask`, returning how many tiles were removed
    pub fn clear_mask(&mut self, mask: &CellMask) -> usize {
        mask.iter().filter(|&pos| self.take(pos).is_some()).count()
    }

    /// Iterate over all tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(Cell::tile)
    }

    /// Find a tile by id
    pub fn find_tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles().find(|tile| tile.id == id)
    }

    /// Check the row/col invariant for every occupied cell
    pub fn is_consistent(&self) -> bool {
        Self::positions().all(|pos| match self.tile(pos) {
            Some(tile) => tile.position() == pos,
            None => true,
        })
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from text rows, one glyph per cell.
    ///
    /// `R B G Y P` are plain tiles, the lowercase letters are the same kinds
    /// carrying a bomb, and `.` is an empty cell. Tile ids are issued from
    /// `next_id` in row-major order. Returns None on a malformed pattern.
    ///
    /// ```
    /// use gemfall_core::Grid;
    ///
    /// let rows = [
    ///     "RRGB....", "........", "........", "........",
    ///     "........", "........", "........", "....r...",
    /// ];
    /// let grid = Grid::from_pattern(&rows, &mut 1).unwrap();
    /// assert_eq!(grid.occupied_count(), 5);
    /// ```
    pub fn from_pattern(rows: &[&str], next_id: &mut u32) -> Option<Self> {
        if rows.len() != BOARD_SIZE {
            return None;
        }
        let mut grid = Self::new();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE {
                return None;
            }
            for (col, glyph) in line.chars().enumerate() {
                if glyph == '.' {
                    continue;
                }
                let kind = TileKind::ALL
                    .into_iter()
                    .find(|k| k.glyph() == glyph.to_ascii_uppercase())?;
                let pos = Position::new(row, col);
                let mut tile = Tile::new(TileId(*next_id), kind, pos);
                if glyph.is_ascii_lowercase() {
                    tile.bonus = Some(BonusKind::Bomb);
                }
                *next_id += 1;
                grid.place(pos, tile);
            }
        }
        Some(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Text dump in the same glyph format [`Grid::from_pattern`] reads.
/// Any bonus renders as a lowercase letter.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let glyph = match self.tile(Position::new(row, col)) {
                    None => '.',
                    Some(tile) if tile.bonus.is_some() => tile.kind.glyph().to_ascii_lowercase(),
                    Some(tile) => tile.kind.glyph(),
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A set of board positions, one bit per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellMask(u64);

impl CellMask {
    pub fn new() -> Self {
        Self(0)
    }

    /// Add a position; returns false if it was already present
    pub fn insert(&mut self, pos: Position) -> bool {
        let bit = 1u64 << pos.index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn remove(&mut self, pos: Position) {
        self.0 &= !(1u64 << pos.index());
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.0 & (1u64 << pos.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Positions in `self` that are not in `other`
    pub fn difference(&self, other: &CellMask) -> CellMask {
        CellMask(self.0 & !other.0)
    }

    /// Positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Grid::positions().filter(move |pos| self.contains(*pos))
    }
}

impl FromIterator<Position> for CellMask {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut mask = CellMask::new();
        for pos in iter {
            mask.insert(pos);
        }
        mask
    }
}
