//! Error types for the rules engine.

use thiserror::Error;

use crate::game::{CellId, CellState, Coord, Player};

/// Reason a move request was rejected before any mutation took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    /// No cell exists at the requested coordinate.
    #[error("no cell at {0}")]
    NoSuchCell(Coord),
    /// The game has already been decided.
    #[error("game is over")]
    GameOver,
    /// The requesting player is not the one to move.
    #[error("not {requested}'s turn (current: {current})")]
    OutOfTurn {
        /// Player whose turn it is.
        current: Player,
        /// Player that asked to move.
        requested: Player,
    },
    /// The target cell is owned by the opponent or blocked.
    #[error("cell {coord} is {state} and cannot be played")]
    NotOwned {
        /// Target coordinate.
        coord: Coord,
        /// Current owner state of the target.
        state: CellState,
    },
}

/// Errors surfaced by the engine and its configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move failed validation; nothing was mutated.
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveRejection),
    /// The configuration cannot drive a game.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A configuration document could not be decoded.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),
    /// A change log entry referenced a cell that no longer exists.
    ///
    /// This is a lifetime-management bug and is never recovered from.
    #[error("rollback failed: change log references missing cell {0}")]
    RollbackFailure(CellId),
    /// Adding energy to a cell would overflow its counter.
    #[error("energy overflow at {0}")]
    EnergyOverflow(Coord),
    /// A cascade probe aborted the move.
    #[error("cascade aborted: {0}")]
    CascadeAborted(String),
    /// Post-move validation found an inconsistent grid.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, GameError>;
