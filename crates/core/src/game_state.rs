//! Game state module - owns one board and runs the swap pipeline
//!
//! A player action is resolved as one synchronous pipeline:
//!
//! 1. Validate the swap (bounds, adjacency, occupied cells).
//! 2. Swap tentatively and detect matches; no match means the swap is
//!    rejected and the grid is left exactly as it was.
//! 3. Cascade: clear matched tiles (plus bomb blasts), apply gravity, refill,
//!    detect again, until a pass finds nothing. Pass `n` scores with
//!    multiplier `n`.
//! 4. If the settled board has no valid move, regenerate it (reshuffle).
//!
//! Every intermediate grid is recorded in the returned [`SwapOutcome`] so a
//! presentation layer can animate the steps at its own pace. Level bookkeeping
//! (moves, score totals, targets) belongs to the caller.

use arrayvec::ArrayVec;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};

use crate::board::{CellMask, Grid};
use crate::error::{PowerUpError, SwapError};
use crate::factory::generate_playable_board;
use crate::gravity::{apply_gravity, refill, GravityResult};
use crate::matching::{find_matches, BonusGrant, MatchResult};
use crate::moves::{find_valid_move, has_valid_moves};
use crate::power::{activate_power_up, expand_detonations};
use crate::rng::{GameRng, TileIdSource};
use crate::scoring::cascade_step_score;
use crate::snapshot::GameSnapshot;
use crate::types::{Position, TileId, CELL_COUNT, MAX_CASCADE_STEPS};

/// One resolved cascade pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// 1-based pass index, also the score multiplier
    pub step: u32,
    /// Tiles the detector matched (empty for a player-triggered activation)
    pub matched: ArrayVec<TileId, CELL_COUNT>,
    /// Bonus granted by this pass; the anchor tile survives carrying it
    pub bonus: Option<BonusGrant>,
    /// Bombs that went off during this pass
    pub detonations: usize,
    /// Cells emptied before gravity
    pub cleared: CellMask,
    /// Tiles moved by gravity
    pub moved: ArrayVec<TileId, CELL_COUNT>,
    pub score: u32,
    /// Grid after gravity and refill
    pub grid: Grid,
}

/// Result of a successful swap or activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub score_delta: u32,
    pub steps: Vec<CascadeStep>,
    /// The settled board was deadlocked (or the cascade hit its ceiling)
    /// and has been regenerated
    pub reshuffled: bool,
}

impl SwapOutcome {
    fn new(steps: Vec<CascadeStep>, reshuffled: bool) -> Self {
        let score_delta = steps
            .iter()
            .map(|s| s.score)
            .fold(0u32, u32::saturating_add);
        Self {
            score_delta,
            steps,
            reshuffled,
        }
    }

    /// Number of consecutive passes (1 = no chain reaction)
    pub fn combo(&self) -> usize {
        self.steps.len()
    }
}

/// Board engine: one grid plus the randomness and identifiers feeding it
///
/// Refills and regenerations draw from `R`, a [`GameRng`] unless another
/// source is injected through [`GameBoard::with_rng`].
#[derive(Debug, Clone)]
pub struct GameBoard<R = GameRng> {
    grid: Grid,
    rng: R,
    ids: TileIdSource,
    seed: u64,
    reshuffles: u32,
}

impl GameBoard {
    /// Create a new playable board with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::seed_from_u64(seed);
        let ids = TileIdSource::new();
        let grid = generate_playable_board(&mut rng, &ids);
        Self {
            grid,
            rng,
            ids,
            seed,
            reshuffles: 0,
        }
    }

    /// Wrap an existing grid. New tiles get ids past the largest one on it.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Self {
            seed,
            ..Self::with_rng(grid, GameRng::seed_from_u64(seed))
        }
    }
}

impl<R: Rng> GameBoard<R> {
    /// Wrap an existing grid, drawing every new tile from `rng`
    pub fn with_rng(grid: Grid, rng: R) -> Self {
        let next_id = grid.tiles().map(|t| t.id.0).max().map_or(1, |max| max + 1);
        Self {
            grid,
            rng,
            ids: TileIdSource::starting_at(next_id),
            seed: 0,
            reshuffles: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seed the generator was built from; 0 for an injected generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of regenerations since creation
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn has_valid_moves(&self) -> bool {
        has_valid_moves(&self.grid)
    }

    /// A swap that would produce a match, if any
    pub fn hint(&self) -> Option<(Position, Position)> {
        find_valid_move(&self.grid)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_grid(&self.grid)
    }

    /// Swap two tiles and resolve the resulting cascade.
    ///
    /// On error the grid is unchanged.
    pub fn try_swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome, SwapError> {
        for pos in [a, b] {
            if !pos.in_bounds() {
                return Err(SwapError::OutOfBounds(pos));
            }
        }
        if !a.is_adjacent(b) {
            return Err(SwapError::NotAdjacent { a, b });
        }
        for pos in [a, b] {
            if !self.grid.is_occupied(pos) {
                return Err(SwapError::EmptyCell(pos));
            }
        }

        let mut tentative = self.grid;
        tentative.swap(a, b);
        let matches = find_matches(&tentative);
        if matches.is_empty() {
            debug!(
                "swap ({}, {}) <-> ({}, {}) makes no match, reverted",
                a.row, a.col, b.row, b.col
            );
            return Err(SwapError::NoMatch { a, b });
        }

        Ok(self.cascade(tentative, matches, Vec::new()))
    }

    /// Detonate the power-up at `pos` and resolve the resulting cascade.
    /// The blast scores as the first pass of its chain.
    pub fn activate(&mut self, pos: Position) -> Result<SwapOutcome, PowerUpError> {
        let activation = activate_power_up(&self.grid, pos)?;
        let score = cascade_step_score(activation.cleared.len(), 1);

        let GravityResult {
            grid: settled,
            moved,
        } = apply_gravity(&activation.grid);
        let grid = refill(&settled, &mut self.rng, &self.ids);

        let first = CascadeStep {
            step: 1,
            matched: ArrayVec::new(),
            bonus: None,
            detonations: activation.detonations,
            cleared: activation.mask,
            moved,
            score,
            grid,
        };
        let matches = find_matches(&grid);
        Ok(self.cascade(grid, matches, vec![first]))
    }

    /// Replace the board with a freshly generated playable one
    pub fn reshuffle(&mut self) {
        self.grid = generate_playable_board(&mut self.rng, &self.ids);
        self.reshuffles += 1;
        info!("board regenerated (reshuffle #{})", self.reshuffles);
    }

    fn cascade(
        &mut self,
        mut grid: Grid,
        mut matches: MatchResult,
        mut steps: Vec<CascadeStep>,
    ) -> SwapOutcome {
        while !matches.is_empty() {
            if steps.len() >= MAX_CASCADE_STEPS {
                warn!(
                    "cascade still matching after {} passes, regenerating board",
                    MAX_CASCADE_STEPS
                );
                self.grid = grid;
                self.reshuffle();
                return SwapOutcome::new(steps, true);
            }

            let step = steps.len() as u32 + 1;
            let record = self.resolve_pass(grid, &matches, step);
            debug!(
                "cascade pass {}: {} matched, {} cleared, +{}",
                step,
                record.matched.len(),
                record.cleared.len(),
                record.score
            );
            grid = record.grid;
            steps.push(record);
            matches = find_matches(&grid);
        }

        self.grid = grid;
        let deadlocked = !has_valid_moves(&self.grid);
        if deadlocked {
            info!("no valid moves after cascade");
            self.reshuffle();
        }
        SwapOutcome::new(steps, deadlocked)
    }

    /// Clear one pass worth of matches, then settle and refill
    fn resolve_pass(&mut self, mut grid: Grid, matches: &MatchResult, step: u32) -> CascadeStep {
        let mut clear = matches.mask();
        let mut protected = CellMask::new();
        let bonus = matches
            .bonus()
            .and_then(|grant| settle_grant(&grid, matches, grant));
        if let Some(grant) = bonus {
            clear.remove(grant.position);
            protected.insert(grant.position);
            grid.set_bonus(grant.position, Some(grant.kind));
        }

        let detonations = expand_detonations(&grid, &mut clear, protected);
        let blast_only = clear.difference(&matches.mask()).len();
        let score = cascade_step_score(matches.len() + blast_only, step);

        grid.clear_mask(&clear);
        let GravityResult {
            grid: settled,
            moved,
        } = apply_gravity(&grid);
        let refilled = refill(&settled, &mut self.rng, &self.ids);

        CascadeStep {
            step,
            matched: matches.ids(),
            bonus,
            detonations,
            cleared: clear,
            moved,
            score,
            grid: refilled,
        }
    }
}

/// Pick the tile that carries this pass's grant. An anchor that already holds
/// a bonus is cleared (and detonates) with the rest of the match, so the
/// grant moves to the farthest plain tile of the anchor's own run. With no
/// such tile the grant is forfeited.
fn settle_grant(grid: &Grid, matches: &MatchResult, grant: BonusGrant) -> Option<BonusGrant> {
    let anchor = grid.tile(grant.position)?;
    if anchor.bonus.is_none() {
        return Some(grant);
    }

    let mask = matches.mask();
    let mut best: Option<(usize, Position)> = None;
    for (dr, dc) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
        let run = std::iter::successors(Some(grant.position), |pos: &Position| {
            let next = Position::new(
                pos.row.checked_add_signed(dr)?,
                pos.col.checked_add_signed(dc)?,
            );
            let same_run = next.in_bounds()
                && mask.contains(next)
                && grid.tile(next).is_some_and(|t| t.kind == anchor.kind);
            same_run.then_some(next)
        });
        for (distance, pos) in run.enumerate().skip(1) {
            let plain = grid.tile(pos).is_some_and(|t| t.bonus.is_none());
            if plain && best.map_or(true, |(far, _)| distance > far) {
                best = Some((distance, pos));
            }
        }
    }

    let Some((_, position)) = best else {
        debug!(
            "anchor ({}, {}) already carries a bonus and its run has no plain tile, grant dropped",
            grant.position.row, grant.position.col
        );
        return None;
    };
    let tile = grid.tile(position)?;
    Some(BonusGrant {
        tile: tile.id,
        position,
        kind: grant.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BonusKind;
    use rand::rngs::mock::StepRng;

    fn board(rows: [&str; 8]) -> GameBoard {
        GameBoard::from_grid(Grid::from_pattern(&rows, &mut 1).unwrap(), 42)
    }

    // Row 3 becomes four reds when (3,2) and (4,2) are swapped.
    const FOUR_SETUP: [&str; 8] = [
        "RBGYPRBG", "GYPRBGYP", "PRBGYPRB", "RRYRPBGY", "YPRBGYPR", "RBGYPRBG", "GYPRBGYP",
        "PRBGYPRB",
    ];

    #[test]
    fn test_new_board_is_stable_and_playable() {
        let game = GameBoard::new(12345);
        assert!(game.grid().is_full());
        assert!(find_matches(game.grid()).is_empty());
        assert!(game.has_valid_moves());
        assert!(game.hint().is_some());
    }

    #[test]
    fn test_same_seed_same_board() {
        assert_eq!(GameBoard::new(7).grid(), GameBoard::new(7).grid());
    }

    #[test]
    fn test_rejected_swaps_leave_grid_untouched() {
        let mut game = board(FOUR_SETUP);
        let before = *game.grid();

        assert_eq!(
            game.try_swap(Position::new(3, 2), Position::new(4, 3)),
            Err(SwapError::NotAdjacent {
                a: Position::new(3, 2),
                b: Position::new(4, 3)
            })
        );
        assert_eq!(
            game.try_swap(Position::new(7, 7), Position::new(7, 8)),
            Err(SwapError::OutOfBounds(Position::new(7, 8)))
        );
        assert!(matches!(
            game.try_swap(Position::new(0, 0), Position::new(0, 1)),
            Err(SwapError::NoMatch { .. })
        ));
        assert_eq!(*game.grid(), before);
    }

    #[test]
    fn test_swap_into_run_of_four_grants_bomb() {
        let mut game = board(FOUR_SETUP);
        let anchor_id = game.grid().tile(Position::new(3, 0)).unwrap().id;

        let outcome = game
            .try_swap(Position::new(3, 2), Position::new(4, 2))
            .unwrap();
        let first = &outcome.steps[0];

        assert_eq!(first.step, 1);
        assert_eq!(first.matched.len(), 4);
        let grant = first.bonus.unwrap();
        assert_eq!(grant.position, Position::new(3, 0));
        assert_eq!(grant.tile, anchor_id);
        assert_eq!(first.cleared.len(), 3);
        assert!(!first.cleared.contains(Position::new(3, 0)));
        assert_eq!(first.score, 40);

        // The anchor stays put, now carrying the bomb.
        let anchor = first.grid.tile(Position::new(3, 0)).unwrap();
        assert_eq!(anchor.id, anchor_id);
        assert_eq!(anchor.bonus, Some(BonusKind::Bomb));
    }

    #[test]
    fn test_matched_bomb_anchor_detonates_and_passes_the_grant_on() {
        let mut rows = FOUR_SETUP;
        rows[3] = "rRYRPBGY";
        let mut game = board(rows);
        let old_anchor = game.grid().tile(Position::new(3, 0)).unwrap().id;
        let heir = game.grid().tile(Position::new(3, 3)).unwrap().id;

        let outcome = game
            .try_swap(Position::new(3, 2), Position::new(4, 2))
            .unwrap();
        let first = &outcome.steps[0];

        assert_eq!(first.matched.len(), 4);
        assert_eq!(first.detonations, 1);
        let grant = first.bonus.unwrap();
        assert_eq!(grant.position, Position::new(3, 3));
        assert_eq!(grant.tile, heir);

        // Three run tiles plus the blast around (3,0), minus the new anchor.
        assert_eq!(first.cleared.len(), 7);
        assert!(first.cleared.contains(Position::new(3, 0)));
        assert!(!first.cleared.contains(Position::new(3, 3)));
        assert_eq!(first.score, 80);

        assert!(first.grid.find_tile(old_anchor).is_none());
        let carrier = first.grid.tile(Position::new(3, 3)).unwrap();
        assert_eq!(carrier.id, heir);
        assert_eq!(carrier.bonus, Some(BonusKind::Bomb));
    }

    #[test]
    fn test_anchor_with_inert_bonus_is_not_relabelled() {
        let mut grid = Grid::from_pattern(&FOUR_SETUP, &mut 1).unwrap();
        grid.set_bonus(Position::new(3, 0), Some(BonusKind::RowClear));
        let old_anchor = grid.tile(Position::new(3, 0)).unwrap().id;
        let mut game = GameBoard::from_grid(grid, 42);

        let outcome = game
            .try_swap(Position::new(3, 2), Position::new(4, 2))
            .unwrap();
        let first = &outcome.steps[0];

        assert_eq!(first.detonations, 0);
        assert_eq!(first.bonus.unwrap().position, Position::new(3, 3));
        assert_eq!(first.cleared.len(), 3);
        assert_eq!(first.score, 40);
        assert!(first.grid.find_tile(old_anchor).is_none());
    }

    #[test]
    fn test_cascade_leaves_a_full_consistent_board() {
        let mut game = board(FOUR_SETUP);
        let outcome = game
            .try_swap(Position::new(3, 2), Position::new(4, 2))
            .unwrap();

        assert!(!outcome.steps.is_empty());
        assert!(game.grid().is_full());
        assert!(game.grid().is_consistent());
        assert!(find_matches(game.grid()).is_empty());
        assert!(game.has_valid_moves());

        let total: u32 = outcome.steps.iter().map(|s| s.score).sum();
        assert_eq!(outcome.score_delta, total);
        for (i, step) in outcome.steps.iter().enumerate() {
            assert_eq!(step.step as usize, i + 1);
        }
    }

    #[test]
    fn test_activate_bomb_scores_blast() {
        let mut grid = Grid::from_pattern(&FOUR_SETUP, &mut 1).unwrap();
        grid.set_bonus(Position::new(6, 6), Some(BonusKind::Bomb));
        let mut game = GameBoard::from_grid(grid, 1);

        let outcome = game.activate(Position::new(6, 6)).unwrap();
        assert_eq!(outcome.steps[0].cleared.len(), 9);
        assert_eq!(outcome.steps[0].score, 90);
        assert!(outcome.steps[0].matched.is_empty());
        assert!(game.grid().is_full());
    }

    #[test]
    fn test_activate_without_bonus_is_rejected() {
        let mut game = board(FOUR_SETUP);
        let before = *game.grid();
        assert_eq!(
            game.activate(Position::new(0, 0)).map(|o| o.score_delta),
            Err(PowerUpError::NoPowerUp(Position::new(0, 0)))
        );
        assert_eq!(*game.grid(), before);
    }

    // No swap on this board lines up three; a bomb in the corner refilled
    // with four reds keeps it that way.
    const DEADLOCK: [&str; 8] = [
        "pPBBPPBB", "GGYYGGYY", "BBPPBBPP", "YYGGYYGG", "PPBBPPBB", "GGYYGGYY", "BBPPBBPP",
        "YYGGYYGG",
    ];

    #[test]
    fn test_deadlock_after_cascade_regenerates_board() {
        let grid = Grid::from_pattern(&DEADLOCK, &mut 1).unwrap();
        assert!(!has_valid_moves(&grid));
        // A constant source refills every hole with red.
        let mut game = GameBoard::with_rng(grid, StepRng::new(0, 0));

        let outcome = game.activate(Position::new(0, 0)).unwrap();
        assert_eq!(outcome.combo(), 1);
        assert_eq!(outcome.score_delta, 40);

        let settled = outcome.steps[0].grid;
        assert!(find_matches(&settled).is_empty());
        assert!(!has_valid_moves(&settled));
        assert!(outcome.reshuffled);
        assert_eq!(game.reshuffles(), 1);

        assert_ne!(*game.grid(), settled);
        assert!(game.grid().is_full());
        assert!(find_matches(game.grid()).is_empty());
        assert!(game.has_valid_moves());
    }

    #[test]
    fn test_endless_cascade_stops_at_ceiling() {
        let grid = Grid::from_pattern(&FOUR_SETUP, &mut 1).unwrap();
        // All-red refills rebuild a run wherever one was cleared.
        let mut game = GameBoard::with_rng(grid, StepRng::new(0, 0));

        let outcome = game
            .try_swap(Position::new(3, 2), Position::new(4, 2))
            .unwrap();
        assert_eq!(outcome.combo(), MAX_CASCADE_STEPS);
        assert!(outcome.reshuffled);
        assert_eq!(game.reshuffles(), 1);
        assert!(!find_matches(&outcome.steps[MAX_CASCADE_STEPS - 1].grid).is_empty());

        let total = outcome
            .steps
            .iter()
            .map(|s| s.score)
            .fold(0u32, u32::saturating_add);
        assert_eq!(outcome.score_delta, total);
        assert!(find_matches(game.grid()).is_empty());
        assert!(game.has_valid_moves());
    }

    #[test]
    fn test_manual_reshuffle_counts() {
        let mut game = GameBoard::new(3);
        game.reshuffle();
        game.reshuffle();
        assert_eq!(game.reshuffles(), 2);
        assert!(game.has_valid_moves());
        assert!(find_matches(game.grid()).is_empty());
    }

    #[test]
    fn test_fresh_tiles_never_reuse_live_ids() {
        let mut game = board(FOUR_SETUP);
        let outcome = game
            .try_swap(Position::new(3, 2), Position::new(4, 2))
            .unwrap();
        assert!(!outcome.steps.is_empty());

        let mut ids: Vec<_> = game.grid().tiles().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), CELL_COUNT);
    }
}
