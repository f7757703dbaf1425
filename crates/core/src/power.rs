//! Power-up activation
//!
//! A bomb clears the occupied cells of the 3x3 block centred on it, clipped
//! to the board. Bombs caught in a blast detonate in turn. The other bonus
//! kinds have no defined effect and are reported as unsupported.

use arrayvec::ArrayVec;
use log::warn;

use crate::board::{CellMask, Grid};
use crate::error::PowerUpError;
use crate::types::{BonusKind, Position, Tile, BOARD_SIZE, CELL_COUNT};

/// Outcome of activating a power-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Grid with the blast area emptied (no gravity applied)
    pub grid: Grid,
    /// Cleared tiles in row-major order
    pub cleared: ArrayVec<Tile, CELL_COUNT>,
    /// Positions emptied by the blast
    pub mask: CellMask,
    /// Bombs that went off, the activated one included
    pub detonations: usize,
}

/// Cells affected by a bonus of `kind` sitting at `center`
pub fn blast_area(
    kind: BonusKind,
    center: Position,
) -> Result<ArrayVec<Position, 9>, PowerUpError> {
    match kind {
        BonusKind::Bomb => {
            let rows = center.row.saturating_sub(1)..=(center.row + 1).min(BOARD_SIZE - 1);
            let mut area = ArrayVec::new();
            for row in rows {
                let cols = center.col.saturating_sub(1)..=(center.col + 1).min(BOARD_SIZE - 1);
                for col in cols {
                    area.push(Position::new(row, col));
                }
            }
            Ok(area)
        }
        BonusKind::RowClear | BonusKind::ColumnClear | BonusKind::Rainbow => {
            Err(PowerUpError::Unsupported(kind))
        }
    }
}

/// Grow `clear` with the blast areas of every bonus tile it contains,
/// repeating for bonus tiles swept up by a blast. Cells in `protected` are
/// never added. Returns the number of detonations.
pub fn expand_detonations(grid: &Grid, clear: &mut CellMask, protected: CellMask) -> usize {
    let mut pending: ArrayVec<Position, CELL_COUNT> = clear.iter().collect();
    let mut detonated = CellMask::new();

    while let Some(pos) = pending.pop() {
        let Some(kind) = grid.tile(pos).and_then(|t| t.bonus) else {
            continue;
        };
        let area = match blast_area(kind, pos) {
            Ok(area) => area,
            Err(err) => {
                warn!("tile at ({}, {}) cleared without effect: {}", pos.row, pos.col, err);
                continue;
            }
        };
        if !detonated.insert(pos) {
            continue;
        }
        for target in area {
            if protected.contains(target) || !grid.is_occupied(target) {
                continue;
            }
            if clear.insert(target) {
                pending.push(target);
            }
        }
    }

    detonated.len()
}

/// Activate the power-up carried by the tile at `pos`
pub fn activate_power_up(grid: &Grid, pos: Position) -> Result<Activation, PowerUpError> {
    if !pos.in_bounds() {
        return Err(PowerUpError::OutOfBounds(pos));
    }
    let kind = grid
        .tile(pos)
        .and_then(|t| t.bonus)
        .ok_or(PowerUpError::NoPowerUp(pos))?;
    // Surface unsupported kinds before touching anything.
    blast_area(kind, pos)?;

    let mut mask = CellMask::new();
    mask.insert(pos);
    let detonations = expand_detonations(grid, &mut mask, CellMask::new());

    let mut cleared_grid = *grid;
    let mut cleared = ArrayVec::new();
    for target in mask.iter() {
        if let Some(tile) = cleared_grid.take(target) {
            cleared.push(tile);
        }
    }

    Ok(Activation {
        grid: cleared_grid,
        cleared,
        mask,
        detonations,
    })
}
