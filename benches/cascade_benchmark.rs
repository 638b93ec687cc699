//! Benchmarks for moves, cascades and whole games.
//!
//! The cascade is the hot path: every move runs it, and a single move on a
//! saturated grid can set off hundreds of explosions.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use octa::game::{CellState, Coord, GameConfig, Grid, Player, RulesEngine, SafetyLevel};
use octa::sim::{SimConfig, run_batch, run_game};

/// A grid where every cell sits one unit below its explosion threshold.
fn saturated_grid(radius: u16) -> Grid {
    let mut grid = Grid::new(radius).unwrap();
    let setup: Vec<(Coord, u32)> = grid
        .iter()
        .map(|(_, cell)| (cell.coord(), cell.live_neighbor_count()))
        .collect();
    for (coord, energy) in setup {
        grid.seed(coord, CellState::Player1, energy);
    }
    grid
}

fn bench_grid_construction(c: &mut Criterion) {
    c.bench_function("grid_new_r16", |b| {
        b.iter(|| black_box(Grid::new(black_box(16))));
    });
}

fn bench_cell_count(c: &mut Criterion) {
    let grid = saturated_grid(16);
    c.bench_function("count_cells_r16", |b| {
        b.iter(|| black_box(grid.count_cells()));
    });
}

fn bench_full_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_cascade_r8");
    for safety_level in [SafetyLevel::None, SafetyLevel::ValidateOnly, SafetyLevel::LightUndo] {
        let config = GameConfig {
            safety_level,
            ..GameConfig::default()
        };
        group.bench_function(format!("{safety_level:?}"), |b| {
            b.iter_batched(
                || RulesEngine::new(saturated_grid(8), config).unwrap(),
                |mut engine| black_box(engine.make_move(Coord::ORIGIN, Player::One)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_single_game(c: &mut Criterion) {
    let config = SimConfig::default();
    c.bench_function("single_game_r3", |b| {
        b.iter(|| black_box(run_game(black_box(42), &config)));
    });
}

fn bench_game_batch(c: &mut Criterion) {
    let config = SimConfig::default();
    c.bench_function("batch_64_games_r3", |b| {
        b.iter(|| black_box(run_batch(black_box(0), 64, &config)));
    });
}

criterion_group!(
    benches,
    bench_grid_construction,
    bench_cell_count,
    bench_full_cascade,
    bench_single_game,
    bench_game_batch
);
criterion_main!(benches);
