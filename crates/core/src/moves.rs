//! Move validation
//!
//! A move is a swap of two orthogonally adjacent cells that creates at least
//! one match. The validator tries every cell against its right and bottom
//! neighbor in row-major order and stops only when a match is found.

use crate::board::Grid;
use crate::matching::find_matches;
use crate::types::{Position, Tile};

/// Whether two tiles sit on orthogonally neighboring cells
pub fn are_adjacent(a: &Tile, b: &Tile) -> bool {
    a.position().is_adjacent(b.position())
}

/// Whether swapping `a` and `b` on a copy of `grid` produces a match
pub fn swap_makes_match(grid: &Grid, a: Position, b: Position) -> bool {
    let mut tentative = *grid;
    tentative.swap(a, b) && !find_matches(&tentative).is_empty()
}

/// First swap (in row-major, right-then-down order) that produces a match
pub fn find_valid_move(grid: &Grid) -> Option<(Position, Position)> {
    for pos in Grid::positions() {
        for neighbor in [pos.right(), pos.below()].into_iter().flatten() {
            if swap_makes_match(grid, pos, neighbor) {
                return Some((pos, neighbor));
            }
        }
    }
    None
}

/// Whether any adjacent swap on `grid` produces a match
pub fn has_valid_moves(grid: &Grid) -> bool {
    find_valid_move(grid).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TileId, TileKind};

    fn grid(rows: [&str; 8]) -> Grid {
        Grid::from_pattern(&rows, &mut 1).unwrap()
    }

    #[test]
    fn test_are_adjacent_matches_position_rule() {
        let t = |row, col| Tile::new(TileId(0), TileKind::Red, Position::new(row, col));
        assert!(are_adjacent(&t(2, 2), &t(2, 3)));
        assert!(are_adjacent(&t(2, 2), &t(1, 2)));
        assert!(!are_adjacent(&t(2, 2), &t(3, 3)));
        assert!(!are_adjacent(&t(2, 2), &t(2, 2)));
        assert!(!are_adjacent(&t(2, 2), &t(2, 4)));
    }

    #[test]
    fn test_deadlocked_grid_has_no_moves() {
        // Rows alternate between two interleaved two-color patterns; no swap
        // can line up three of a kind.
        let g = grid([
            "RRBBRRBB", "GGYYGGYY", "BBRRBBRR", "YYGGYYGG", "RRBBRRBB", "GGYYGGYY", "BBRRBBRR",
            "YYGGYYGG",
        ]);
        assert!(find_matches(&g).is_empty());
        assert!(!has_valid_moves(&g));
        assert_eq!(find_valid_move(&g), None);
    }

    #[test]
    fn test_finds_first_move_in_scan_order() {
        // Swapping (0,2) with (1,2) completes the red run on row 0.
        let g = grid([
            "RRBBPPRR", "GGRYGGYY", "BBYRBBRR", "YYGGYYGG", "RRBBRRBB", "GGYYGGYY", "BBRRBBRR",
            "YYGGYYGG",
        ]);
        assert!(find_matches(&g).is_empty());
        let found = find_valid_move(&g).unwrap();
        assert_eq!(found, (Position::new(0, 2), Position::new(1, 2)));
        assert!(has_valid_moves(&g));
    }

    #[test]
    fn test_swap_makes_match_leaves_grid_untouched() {
        let g = grid([
            "RRBBPPRR", "GGRYGGYY", "BBYRBBRR", "YYGGYYGG", "RRBBRRBB", "GGYYGGYY", "BBRRBBRR",
            "YYGGYYGG",
        ]);
        let before = g;
        assert!(swap_makes_match(&g, Position::new(0, 2), Position::new(1, 2)));
        assert!(!swap_makes_match(&g, Position::new(7, 6), Position::new(7, 7)));
        assert_eq!(g, before);
    }
}
