//! Seeded self-play for the rules engine.
//!
//! Provides a pure function interface: `(seed, config) -> GameSummary`
//!
//! The simulator handles:
//! - Deterministic grid generation with blocked cells
//! - A seeded random move policy for both players
//! - Parallel batches with rayon, merged into aggregate statistics

mod mapgen;
mod stats;

pub use mapgen::generate_grid;
pub use stats::BatchStats;

use mapgen::Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::EngineResult;
use crate::game::{GameConfig, GameResult, MoveOutcome, RulesEngine};

/// Mixed into the game seed so move choices do not mirror grid generation.
const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimConfig {
    /// Grid radius.
    pub radius: u16,
    /// Share of cells to block, in percent.
    pub blocked_percent: u8,
    /// Stop an undecided game after this many moves.
    pub max_moves: u32,
    /// Rules for every game.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            radius: 3,
            blocked_percent: 0,
            max_moves: 10_000,
            game: GameConfig::default(),
        }
    }
}

/// Why a simulated game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    /// A win condition decided the game.
    Decided,
    /// The move cap was reached first.
    MoveCap,
    /// The player to move had no legal cell.
    NoLegalMove,
}

/// Summary of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// Seed the game was generated from.
    pub seed: u64,
    /// Final (or latest) result.
    pub result: GameResult,
    /// Why the game stopped.
    pub finish: Finish,
    /// Successful moves played.
    pub moves: u32,
    /// Explosions over the whole game.
    pub explosions: u64,
    /// Most explosions in a single move.
    pub longest_cascade: u32,
}

/// Play one seeded random game.
///
/// Both players pick uniformly among their legal cells. Given the same seed
/// and configuration this always produces the same summary.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a move fails.
pub fn run_game(seed: u64, config: &SimConfig) -> EngineResult<GameSummary> {
    run_game_with(seed, config, |_, _| {})
}

/// Play one seeded random game, handing every move to `observe`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a move fails.
#[instrument(level = "debug", skip(config, observe))]
pub fn run_game_with<F>(seed: u64, config: &SimConfig, mut observe: F) -> EngineResult<GameSummary>
where
    F: FnMut(&RulesEngine, &MoveOutcome),
{
    let grid = generate_grid(seed, config.radius, config.blocked_percent)?;
    let mut engine = RulesEngine::new(grid, config.game)?;
    let mut rng = Rng::new(seed ^ POLICY_SEED_SALT);

    let mut moves = 0u32;
    let mut explosions = 0u64;
    let mut longest_cascade = 0u32;

    let finish = loop {
        if engine.is_game_over() {
            break Finish::Decided;
        }
        if moves >= config.max_moves {
            break Finish::MoveCap;
        }
        let legal = engine.legal_moves();
        if legal.is_empty() {
            break Finish::NoLegalMove;
        }
        let coord = legal[rng.next_index(legal.len())];
        let outcome = engine.make_move(coord, engine.current_player())?;

        moves += 1;
        explosions += u64::from(outcome.report.explosions);
        longest_cascade = longest_cascade.max(outcome.report.explosions);
        observe(&engine, &outcome);
    };

    let result = engine
        .last_result()
        .unwrap_or_else(|| GameResult::in_progress(engine.turn_count(), engine.cell_counts()));
    debug!(moves, ?finish, outcome = %result.describe(), "simulation finished");

    Ok(GameSummary {
        seed,
        result,
        finish,
        moves,
        explosions,
        longest_cascade,
    })
}

/// Play `games` seeded games in parallel and merge their statistics.
///
/// Game `i` uses seed `base_seed + i` (wrapping). Failed games are counted
/// as errors rather than aborting the batch.
#[must_use]
pub fn run_batch(base_seed: u64, games: u64, config: &SimConfig) -> BatchStats {
    run_batch_with(base_seed, games, config, || {})
}

/// [`run_batch`], calling `on_game` from the worker thread as each game ends.
#[must_use]
pub fn run_batch_with<F>(base_seed: u64, games: u64, config: &SimConfig, on_game: F) -> BatchStats
where
    F: Fn() + Sync,
{
    // Each thread accumulates into its own BatchStats, then they are merged
    (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            match run_game(base_seed.wrapping_add(i), config) {
                Ok(summary) => local.add_summary(&summary),
                Err(e) => local.add_error(&e),
            }
            on_game();
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}
