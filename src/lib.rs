// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Octa: a deterministic chain-reaction territory game engine.
//!
//! Two players take turns adding energy to cells of a square grid. A cell
//! whose energy exceeds its neighbor count explodes, capturing its
//! neighbors and possibly setting off further explosions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Simulation (seeded self-play)     │
//! ├─────────────────────────────────────┤
//! │   Rules Engine (cascade, rollback)  │
//! ├─────────────────────────────────────┤
//! │   Grid (cell arena + adjacency)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use octa::{Coord, GameConfig, Grid, Player, RulesEngine};
//!
//! let grid = Grid::new(1).ok_or("radius too large")?;
//! let mut engine = RulesEngine::new(grid, GameConfig::default())?;
//!
//! let outcome = engine.make_move(Coord::new(0, 0), Player::One)?;
//! assert_eq!(outcome.result.player1_cells, 1);
//! assert_eq!(engine.current_player(), Player::Two);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod game;
pub mod sim;

pub use error::{EngineResult, GameError, MoveRejection};

// Re-export key game types at crate root for convenience
pub use game::{
    Cell, CellId, CellState, Coord, Direction, GameConfig, GameResult, GameStatus, Grid,
    MoveOutcome, Player, RulesEngine, SafetyLevel, WinCondition,
};
