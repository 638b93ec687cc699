//! The two players and their mapping to cell ownership.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::CellState;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First player; always opens the game.
    One,
    /// Second player.
    Two,
}

impl Player {
    /// Both players in turn order.
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Cell state marking ownership by this player.
    #[must_use]
    pub const fn cell_state(self) -> CellState {
        match self {
            Player::One => CellState::Player1,
            Player::Two => CellState::Player2,
        }
    }

    /// 1-based player number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}
