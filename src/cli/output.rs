//! Output formatting utilities for CLI.

// Rates and durations are reported as floats
#![allow(clippy::cast_precision_loss)]

use std::fmt::Write as _;

use octa::game::{CellState, Coord, Grid, MoveOutcome, Player};
use octa::sim::{BatchStats, Finish, GameSummary, SimConfig};
use serde::Serialize;

/// Render the grid as rows of fixed-width cell tokens, north at the top.
///
/// `.` is an empty neutral cell, a bare number a neutral cell holding energy,
/// `xN`/`oN` cells owned by player one/two with energy `N`, and `#` blocked.
pub(super) fn render_grid(grid: &Grid) -> String {
    let mut output = String::new();
    let r = i32::from(grid.radius());

    for y in -r..=r {
        for x in -r..=r {
            let token = match grid.get(Coord::new(x, y)) {
                None => "?".to_string(),
                Some(cell) => match cell.state() {
                    CellState::Blocked => "#".to_string(),
                    CellState::Neutral if cell.energy() == 0 => ".".to_string(),
                    CellState::Neutral => cell.energy().to_string(),
                    CellState::Player1 => format!("x{}", cell.energy()),
                    CellState::Player2 => format!("o{}", cell.energy()),
                },
            };
            let _ = write!(output, "{token:>4}");
        }
        output.push('\n');
    }

    output
}

/// One line describing a move.
pub(super) fn format_move(mover: Player, outcome: &MoveOutcome) -> String {
    let target = outcome
        .affected
        .first()
        .map_or_else(|| "?".to_string(), ToString::to_string);
    let mut line = format!(
        "Turn {:>4}: {mover} plays {target}",
        outcome.result.turn_count
    );
    if outcome.report.explosions > 0 {
        let _ = write!(
            line,
            " ({} explosions, {} cells affected)",
            outcome.report.explosions,
            outcome.affected.len()
        );
    }
    let _ = write!(
        line,
        " [{} vs {}]",
        outcome.result.player1_cells, outcome.result.player2_cells
    );
    line
}

/// Format a game summary as human-readable text.
pub(super) fn format_game_text(summary: &GameSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", summary.seed);
    let _ = writeln!(output, "  Outcome: {}", summary.result.describe());
    let finish = match summary.finish {
        Finish::Decided => "decided",
        Finish::MoveCap => "move cap reached",
        Finish::NoLegalMove => "no legal move",
    };
    let _ = writeln!(output, "  Finish: {finish}");
    let _ = writeln!(output, "  Moves: {}", summary.moves);
    let _ = writeln!(
        output,
        "  Cells: player 1 {}, player 2 {}",
        summary.result.player1_cells, summary.result.player2_cells
    );
    let _ = writeln!(
        output,
        "  Explosions: {} (longest cascade {})",
        summary.explosions, summary.longest_cascade
    );

    output
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult<'a> {
    /// Seed of the first game.
    base_seed: u64,
    /// Settings shared by every game.
    config: &'a SimConfig,
    /// Raw totals.
    stats: &'a BatchStats,
    /// Player one win rate (0.0-1.0).
    player1_win_rate: f64,
    /// Player two win rate (0.0-1.0).
    player2_win_rate: f64,
    /// Average game length in moves.
    avg_moves: f64,
    /// Average explosions per game.
    avg_explosions: f64,
    /// Wall-clock duration in seconds.
    duration_secs: f64,
}

impl<'a> JsonBatchResult<'a> {
    /// Create from stats and the batch settings.
    pub(super) fn new(
        base_seed: u64,
        config: &'a SimConfig,
        stats: &'a BatchStats,
        duration_secs: f64,
    ) -> Self {
        Self {
            base_seed,
            config,
            stats,
            player1_win_rate: stats.win_rate(Player::One),
            player2_win_rate: stats.win_rate(Player::Two),
            avg_moves: stats.avg_moves(),
            avg_explosions: stats.avg_explosions(),
            duration_secs,
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, config: &SimConfig) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games);
    output.push_str("========================================\n\n");

    let _ = writeln!(
        output,
        "Grid: radius {}, {}% blocked, {:?} win condition",
        config.radius, config.blocked_percent, config.game.win_condition
    );
    output.push('\n');

    output.push_str("Win Rates:\n");
    for player in Player::BOTH {
        let _ = writeln!(
            output,
            "  {player}: {:.1}% ({} wins)",
            stats.win_rate(player) * 100.0,
            stats.wins(player)
        );
    }
    let _ = writeln!(output, "  Draws: {}", stats.draws);
    let _ = writeln!(output, "  Undecided: {}", stats.undecided);
    let _ = writeln!(output, "  Errors: {}", stats.errors);
    output.push('\n');

    output.push_str("Game Length:\n");
    let _ = writeln!(output, "  Average moves: {:.1}", stats.avg_moves());
    let _ = writeln!(output, "  Longest game: {} moves", stats.longest_game);
    let _ = writeln!(output, "  Average explosions: {:.1}", stats.avg_explosions());
    let _ = writeln!(output, "  Longest cascade: {}", stats.longest_cascade);

    if let Some(error) = &stats.last_error {
        output.push('\n');
        let _ = writeln!(output, "Last error: {error}");
    }

    output
}

/// Format batch stats as CSV: a header and one row.
pub(super) fn format_batch_csv(stats: &BatchStats, base_seed: u64) -> String {
    let mut output = String::new();

    output.push_str(
        "base_seed,games,player1_wins,player2_wins,draws,undecided,errors,avg_moves,longest_game,avg_explosions,longest_cascade\n",
    );
    let _ = writeln!(
        output,
        "{base_seed},{},{},{},{},{},{},{:.2},{},{:.2},{}",
        stats.games,
        stats.player1_wins,
        stats.player2_wins,
        stats.draws,
        stats.undecided,
        stats.errors,
        stats.avg_moves(),
        stats.longest_game,
        stats.avg_explosions(),
        stats.longest_cascade
    );

    output
}
