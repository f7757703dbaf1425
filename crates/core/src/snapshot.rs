use std::hash::Hasher;

use crate::board::Grid;
use crate::types::{BonusKind, Position, BOARD_SIZE};

/// Stable FNV-1a hasher for deterministic `board_id`.
///
/// We avoid `DefaultHasher` here since its output is not guaranteed stable across
/// Rust versions/platforms.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Numeric code of a bonus kind (0 = none)
pub const fn bonus_code(bonus: Option<BonusKind>) -> u8 {
    match bonus {
        None => 0,
        Some(BonusKind::Bomb) => 1,
        Some(BonusKind::RowClear) => 2,
        Some(BonusKind::ColumnClear) => 3,
        Some(BonusKind::Rainbow) => 4,
    }
}

/// Plain-number view of a grid for presentation layers
///
/// `board` holds `kind index + 1` per cell (0 = empty); `bonus` holds
/// [`bonus_code`] per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_SIZE]; BOARD_SIZE],
    pub bonus: [[u8; BOARD_SIZE]; BOARD_SIZE],
    pub board_id: u64,
}

impl GameSnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut s = Self::default();
        s.write_grid(grid);
        s
    }

    /// Overwrite this snapshot in place (no allocation)
    pub fn write_grid(&mut self, grid: &Grid) {
        let mut hasher = Fnv1aHasher::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let tile = grid.tile(Position::new(row, col));
                let kind = tile.map_or(0, |t| t.kind.index() as u8 + 1);
                let bonus = bonus_code(tile.and_then(|t| t.bonus));
                self.board[row][col] = kind;
                self.bonus[row][col] = bonus;
                hasher.write(&[kind, bonus]);
            }
        }
        self.board_id = hasher.finish();
    }

    /// Number of empty cells
    pub fn holes(&self) -> usize {
        self.board.iter().flatten().filter(|&&k| k == 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_codes() {
        let mut rows = ["........"; 8];
        rows[0] = "Rp......";
        let grid = Grid::from_pattern(&rows, &mut 1).unwrap();
        let snap = GameSnapshot::from_grid(&grid);

        assert_eq!(snap.board[0][0], 1);
        assert_eq!(snap.board[0][1], 5);
        assert_eq!(snap.bonus[0][1], 1);
        assert_eq!(snap.holes(), 62);
    }

    #[test]
    fn test_board_id_tracks_content_not_ids() {
        let rows = ["RBGYPRBG"; 8];
        let a = Grid::from_pattern(&rows, &mut 1).unwrap();
        let b = Grid::from_pattern(&rows, &mut 500).unwrap();
        assert_eq!(
            GameSnapshot::from_grid(&a).board_id,
            GameSnapshot::from_grid(&b).board_id
        );

        let mut c = a;
        c.set_bonus(Position::new(4, 4), Some(BonusKind::Bomb));
        assert_ne!(
            GameSnapshot::from_grid(&a).board_id,
            GameSnapshot::from_grid(&c).board_id
        );
    }
}
