use thiserror::Error;

use crate::types::{BonusKind, Position};

/// Why a proposed swap was rejected. A rejected swap never changes the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("position ({}, {}) is off the board", .0.row, .0.col)]
    OutOfBounds(Position),
    #[error("cell ({}, {}) holds no tile", .0.row, .0.col)]
    EmptyCell(Position),
    #[error("({}, {}) and ({}, {}) are not adjacent", .a.row, .a.col, .b.row, .b.col)]
    NotAdjacent { a: Position, b: Position },
    #[error("swapping ({}, {}) and ({}, {}) makes no match", .a.row, .a.col, .b.row, .b.col)]
    NoMatch { a: Position, b: Position },
}

impl SwapError {
    pub fn code(self) -> &'static str {
        match self {
            SwapError::OutOfBounds(_) | SwapError::EmptyCell(_) => "invalid_target",
            SwapError::NotAdjacent { .. } => "not_adjacent",
            SwapError::NoMatch { .. } => "no_match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PowerUpError {
    #[error("position ({}, {}) is off the board", .0.row, .0.col)]
    OutOfBounds(Position),
    #[error("no power-up at ({}, {})", .0.row, .0.col)]
    NoPowerUp(Position),
    #[error("{} activation is not supported", .0.as_str())]
    Unsupported(BonusKind),
}

impl PowerUpError {
    pub fn code(self) -> &'static str {
        match self {
            PowerUpError::OutOfBounds(_) | PowerUpError::NoPowerUp(_) => "invalid_target",
            PowerUpError::Unsupported(_) => "unsupported_bonus",
        }
    }
}
