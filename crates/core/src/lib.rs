//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the 8x8 match-3 board: generation, match
//! detection, gravity and refill, move validation, power-ups and cascade
//! scoring. It does no I/O; the only side channel is the `log` facade.
//!
//! - **Deterministic**: a [`GameBoard`] built from a seed replays identically
//! - **Pure pipeline stages**: every stage takes a [`Grid`] and returns a new one,
//!   so each can be tested on hand-written patterns
//! - **Allocation-light**: grids are flat `Copy` arrays and per-pass tile lists
//!   live in `ArrayVec`s sized to the board
//!
//! # Module Structure
//!
//! - [`board`]: the grid and the `CellMask` position set
//! - [`factory`]: match-free board generation
//! - [`matching`]: run detection and bonus grants
//! - [`gravity`]: column compaction and refill
//! - [`moves`]: adjacency and valid-move search
//! - [`power`]: bomb blasts and chained detonations
//! - [`scoring`]: cascade multiplier rules
//! - [`game_state`]: the swap/cascade pipeline tying the above together
//! - [`snapshot`]: plain-number view of a board for presentation layers
//!
//! # Example
//!
//! ```
//! use gemfall_core::GameBoard;
//!
//! let mut game = GameBoard::new(12345);
//! let (a, b) = game.hint().expect("fresh boards are playable");
//! let outcome = game.try_swap(a, b).unwrap();
//!
//! assert!(outcome.score_delta >= 30);
//! assert!(game.grid().is_full());
//! ```

pub mod board;
pub mod error;
pub mod factory;
pub mod game_state;
pub mod gravity;
pub mod matching;
pub mod moves;
pub mod power;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use gemfall_types as types;

// Re-export commonly used types for convenience
pub use board::{CellMask, Grid};
pub use error::{PowerUpError, SwapError};
pub use factory::{generate_board, generate_playable_board};
pub use game_state::{CascadeStep, GameBoard, SwapOutcome};
pub use gravity::{apply_gravity, refill, GravityResult};
pub use matching::{find_matches, BonusGrant, MatchResult};
pub use moves::{are_adjacent, find_valid_move, has_valid_moves, swap_makes_match};
pub use power::{activate_power_up, blast_area, Activation};
pub use rng::{GameRng, TileIdSource};
pub use scoring::{cascade_step_score, cascade_total};
pub use snapshot::GameSnapshot;
