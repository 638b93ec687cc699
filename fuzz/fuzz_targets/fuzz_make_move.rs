#![no_main]

//! Move sequence fuzzer.
//!
//! This fuzz target plays arbitrary move sequences on a seeded grid:
//! 1. Seed cells with arbitrary owners, energies and blocks
//! 2. Play moves, legal or not, for whichever player the input names
//! 3. Check grid invariants and energy accounting after every move
//!
//! Illegal moves must be rejected without touching the grid.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use octa::game::{
    CellState, Coord, GameConfig, Grid, Player, RulesEngine, WinCondition, check_invariants,
    check_move,
};

/// A fuzzer-generated cell setup.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzSeed {
    x: i8,
    y: i8,
    kind: u8,
    energy: u16,
}

/// A fuzzer-generated move.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzMove {
    x: i8,
    y: i8,
    second_player: bool,
}

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MoveInput {
    radius: u8,
    seeds: Vec<FuzzSeed>,
    moves: Vec<FuzzMove>,
    majority: bool,
    stop_on_enemy: bool,
    turn_limit: u8,
}

fuzz_target!(|input: MoveInput| {
    // Cap values to avoid excessive runtime
    let radius = u16::from(input.radius % 6);
    let Some(mut grid) = Grid::new(radius) else {
        return;
    };
    let r = i32::from(radius);
    let wrap = |v: i8| i32::from(v) % (r + 1);

    for seed in input.seeds.iter().take(40) {
        let coord = Coord::new(wrap(seed.x), wrap(seed.y));
        let energy = u32::from(seed.energy % 512);
        match seed.kind % 4 {
            0 => grid.seed(coord, CellState::Neutral, energy),
            1 => grid.seed(coord, CellState::Player1, energy),
            2 => grid.seed(coord, CellState::Player2, energy),
            _ => grid.block(coord),
        };
    }

    let config = GameConfig {
        win_condition: if input.majority {
            WinCondition::TurnLimitMajority
        } else {
            WinCondition::Elimination
        },
        turn_limit: u32::from(input.turn_limit).max(1),
        stop_on_enemy: input.stop_on_enemy,
        ..GameConfig::default()
    };
    let Ok(mut engine) = RulesEngine::new(grid, config) else {
        return;
    };

    for mv in input.moves.iter().take(64) {
        // Coordinates may fall one step outside the grid on purpose
        let coord = Coord::new(i32::from(mv.x) % (r + 2), i32::from(mv.y) % (r + 2));
        let player = if mv.second_player { Player::Two } else { Player::One };
        let valid = engine.is_valid_move(coord, player);
        let before_energy = engine.grid().total_energy();
        let before_turn = engine.turn_count();

        match engine.make_move(coord, player) {
            Ok(outcome) => {
                assert!(valid, "accepted a move validation rejected");
                let report = outcome.report;
                assert_eq!(
                    engine.grid().total_energy(),
                    before_energy + 1 + report.energy_distributed - report.energy_released
                );
                assert!(check_move(engine.grid(), &outcome.affected).is_empty());
                assert_eq!(engine.turn_count(), before_turn + 1);
            }
            Err(_) => {
                assert!(!valid, "valid move failed without a fault");
                assert_eq!(engine.grid().total_energy(), before_energy);
                assert_eq!(engine.turn_count(), before_turn);
            }
        }

        let violations = check_invariants(engine.grid());
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
    }
});
