//! Move outcomes and win-condition evaluation.

use serde::Serialize;

use crate::game::{CellCounts, Coord, GameConfig, Player, WinCondition};

/// Turn count from which elimination is checked.
///
/// Both players must have moved at least once.
pub const ELIMINATION_MIN_TURNS: u32 = 2;

/// Why a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// The opponent holds no cells.
    Elimination,
    /// More cells than the opponent when the turn limit hit.
    TurnLimitMajority,
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum GameStatus {
    /// Play continues.
    InProgress,
    /// The game has a winner.
    Won {
        /// Winning player.
        winner: Player,
        /// How the game was won.
        reason: WinReason,
    },
    /// The turn limit hit with equal cell counts.
    Draw,
}

/// Snapshot of the game after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Current status.
    #[serde(flatten)]
    pub status: GameStatus,
    /// Moves played so far.
    pub turn_count: u32,
    /// Cells owned by player one.
    pub player1_cells: u32,
    /// Cells owned by player two.
    pub player2_cells: u32,
}

impl GameResult {
    /// Result for a game still in progress.
    #[must_use]
    pub const fn in_progress(turn_count: u32, counts: CellCounts) -> Self {
        Self {
            status: GameStatus::InProgress,
            turn_count,
            player1_cells: counts.player1,
            player2_cells: counts.player2,
        }
    }

    /// The winner, if there is one.
    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won { winner, .. } => Some(winner),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    /// Check if this result ends the game.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        !matches!(self.status, GameStatus::InProgress)
    }

    /// Check if the game ended level.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        matches!(self.status, GameStatus::Draw)
    }

    /// Short human-readable description.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.status {
            GameStatus::InProgress => "game continues".to_string(),
            GameStatus::Won {
                winner,
                reason: WinReason::Elimination,
            } => format!("{} eliminated, {winner} wins", winner.opponent()),
            GameStatus::Won {
                winner,
                reason: WinReason::TurnLimitMajority,
            } => format!("turn limit reached, {winner} wins by majority"),
            GameStatus::Draw => "turn limit reached, draw".to_string(),
        }
    }
}

/// Totals for one cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    /// Number of explosions.
    pub explosions: u32,
    /// Energy removed from exploding cells.
    pub energy_released: u64,
    /// Energy handed to neighbors.
    pub energy_distributed: u64,
    /// Snapshots written to the change log.
    pub changes_recorded: usize,
}

impl CascadeReport {
    /// Energy that left the grid during the cascade.
    #[must_use]
    pub const fn energy_lost(&self) -> u64 {
        self.energy_released - self.energy_distributed
    }
}

/// Everything a successful move produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// Game state after the move.
    pub result: GameResult,
    /// Cells touched by the move: the target first, then in order of first
    /// touch.
    pub affected: Vec<Coord>,
    /// Cascade totals.
    pub report: CascadeReport,
}

/// Decide the game from cell counts and turn count.
///
/// Returns `None` while the game continues.
#[must_use]
pub fn evaluate_win(config: GameConfig, counts: CellCounts, turn_count: u32) -> Option<GameResult> {
    let result = |status| GameResult {
        status,
        turn_count,
        player1_cells: counts.player1,
        player2_cells: counts.player2,
    };

    match config.win_condition {
        WinCondition::Elimination => {
            if turn_count < ELIMINATION_MIN_TURNS {
                return None;
            }
            let winner = match (counts.player1, counts.player2) {
                (0, p2) if p2 > 0 => Player::Two,
                (p1, 0) if p1 > 0 => Player::One,
                _ => return None,
            };
            Some(result(GameStatus::Won {
                winner,
                reason: WinReason::Elimination,
            }))
        }
        WinCondition::TurnLimitMajority => {
            if turn_count < config.turn_limit {
                return None;
            }
            let status = match counts.player1.cmp(&counts.player2) {
                std::cmp::Ordering::Greater => GameStatus::Won {
                    winner: Player::One,
                    reason: WinReason::TurnLimitMajority,
                },
                std::cmp::Ordering::Less => GameStatus::Won {
                    winner: Player::Two,
                    reason: WinReason::TurnLimitMajority,
                },
                std::cmp::Ordering::Equal => GameStatus::Draw,
            };
            Some(result(status))
        }
    }
}
