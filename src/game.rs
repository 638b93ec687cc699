//! Game layer for Octa.
//!
//! Implements the chain-reaction rules on a square grid:
//! - Coordinates, directions and players
//! - Cells stored in an arena with precomputed neighbor links
//! - Per-move change log for rollback
//! - Rules engine: validation, cascades, win conditions
//! - Invariant checks used by tests, fuzzing and the validating safety level

mod cell;
mod change_log;
mod config;
mod coord;
mod grid;
mod invariants;
mod outcome;
mod player;
mod probe;
mod rules;

pub use cell::{Cell, CellId, CellState};
pub use change_log::{CellChange, ChangeLog};
pub use config::{GameConfig, SafetyLevel, WinCondition};
pub use coord::{Coord, Direction, NUM_DIRECTIONS};
pub use grid::{CellCounts, Grid, MAX_RADIUS};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants, check_move};
pub use outcome::{
    CascadeReport, ELIMINATION_MIN_TURNS, GameResult, GameStatus, MoveOutcome, WinReason,
    evaluate_win,
};
pub use player::Player;
pub use probe::{CascadeProbe, FailAfter, NoProbe, TraceProbe};
pub use rules::RulesEngine;
