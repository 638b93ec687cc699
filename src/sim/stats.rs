//! Aggregated statistics over many simulated games.

// Averages are reported as floats
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

use crate::error::GameError;
use crate::game::{GameStatus, Player};
use crate::sim::{Finish, GameSummary};

/// Totals over a batch of simulated games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Games attempted.
    pub games: u64,
    /// Games won by player one.
    pub player1_wins: u64,
    /// Games won by player two.
    pub player2_wins: u64,
    /// Games ending level at the turn limit.
    pub draws: u64,
    /// Games stopped before a result (move cap or no legal move).
    pub undecided: u64,
    /// Games that failed with an error.
    pub errors: u64,
    /// Moves across finished games.
    pub total_moves: u64,
    /// Explosions across finished games.
    pub total_explosions: u64,
    /// Most explosions in a single move.
    pub longest_cascade: u32,
    /// Most moves in a single game.
    pub longest_game: u32,
    /// One of the error messages seen, if any.
    pub last_error: Option<String>,
}

impl BatchStats {
    /// Add a finished game.
    pub fn add_summary(&mut self, summary: &GameSummary) {
        self.games += 1;
        self.total_moves += u64::from(summary.moves);
        self.total_explosions += summary.explosions;
        self.longest_cascade = self.longest_cascade.max(summary.longest_cascade);
        self.longest_game = self.longest_game.max(summary.moves);

        match (summary.finish, summary.result.status) {
            (Finish::Decided, GameStatus::Won { winner, .. }) => match winner {
                Player::One => self.player1_wins += 1,
                Player::Two => self.player2_wins += 1,
            },
            (Finish::Decided, GameStatus::Draw) => self.draws += 1,
            _ => self.undecided += 1,
        }
    }

    /// Add a game that failed.
    pub fn add_error(&mut self, error: &GameError) {
        self.games += 1;
        self.errors += 1;
        self.last_error = Some(error.to_string());
    }

    /// Fold another batch into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.player1_wins += other.player1_wins;
        self.player2_wins += other.player2_wins;
        self.draws += other.draws;
        self.undecided += other.undecided;
        self.errors += other.errors;
        self.total_moves += other.total_moves;
        self.total_explosions += other.total_explosions;
        self.longest_cascade = self.longest_cascade.max(other.longest_cascade);
        self.longest_game = self.longest_game.max(other.longest_game);
        if self.last_error.is_none() {
            self.last_error.clone_from(&other.last_error);
        }
    }

    /// Wins for `player`.
    #[must_use]
    pub const fn wins(&self, player: Player) -> u64 {
        match player {
            Player::One => self.player1_wins,
            Player::Two => self.player2_wins,
        }
    }

    /// Win rate for `player` (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(player) as f64 / self.games as f64
    }

    /// Games that ran to completion without error.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.games - self.errors
    }

    /// Average moves per completed game.
    #[must_use]
    pub fn avg_moves(&self) -> f64 {
        let completed = self.completed();
        if completed == 0 {
            return 0.0;
        }
        self.total_moves as f64 / completed as f64
    }

    /// Average explosions per completed game.
    #[must_use]
    pub fn avg_explosions(&self) -> f64 {
        let completed = self.completed();
        if completed == 0 {
            return 0.0;
        }
        self.total_explosions as f64 / completed as f64
    }
}
