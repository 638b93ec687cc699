//! CLI command implementations for Octa.

pub(crate) mod play;
pub(crate) mod tournament;
pub(crate) mod validate;

mod output;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use octa::GameError;
use octa::game::GameConfig;
use octa::sim::SimConfig;

/// Output format for the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Grid and rules options shared by `play` and `tournament`.
#[derive(Args, Debug, Clone)]
pub(crate) struct GameOptions {
    /// Grid radius (the grid spans -r..=r on both axes)
    #[arg(short, long, default_value = "3")]
    pub(crate) radius: u16,

    /// Percentage of cells to block
    #[arg(short, long, default_value = "0")]
    pub(crate) blocked: u8,

    /// JSON game configuration file
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Stop a game after this many moves
    #[arg(short, long, default_value = "10000")]
    pub(crate) max_moves: u32,
}

impl GameOptions {
    /// Build the simulation settings, loading the configuration file if any.
    pub(crate) fn sim_config(&self) -> Result<SimConfig, CliError> {
        let game = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        Ok(SimConfig {
            radius: self.radius,
            blocked_percent: self.blocked,
            max_moves: self.max_moves,
            game,
        })
    }
}

/// Use the given seed or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
