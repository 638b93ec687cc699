//! Property-based tests for the rules engine.
//!
//! These tests verify energy accounting, termination, turn order and
//! rollback on randomly seeded grids.
//! Run with: cargo test --release prop_rules

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use octa::GameError;
use octa::game::{
    Cell, CellState, Coord, FailAfter, GameConfig, Grid, Player, RulesEngine, check_invariants,
    check_move,
};

/// (cell selector, kind selector, energy)
type Seed = (usize, u8, u32);

fn seeded_grid(radius: u16, seeds: &[Seed]) -> Grid {
    let mut grid = Grid::new(radius).unwrap();
    let coords: Vec<Coord> = grid.iter().map(|(_, cell)| cell.coord()).collect();
    for &(pick, kind, energy) in seeds {
        let coord = coords[pick % coords.len()];
        match kind % 4 {
            0 => grid.seed(coord, CellState::Neutral, energy),
            1 => grid.seed(coord, CellState::Player1, energy),
            2 => grid.seed(coord, CellState::Player2, energy),
            _ => grid.block(coord),
        };
    }
    grid
}

fn snapshot(grid: &Grid) -> Vec<Cell> {
    grid.iter().map(|(_, cell)| *cell).collect()
}

fn seeds() -> impl Strategy<Value = Vec<Seed>> {
    prop::collection::vec((any::<usize>(), any::<u8>(), 0u32..200), 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every move returns, leaves the grid consistent and every touched cell stable.
    #[test]
    fn prop_cascade_terminates(
        radius in 0u16..=4,
        seeds in seeds(),
        pick in any::<usize>(),
        stop_on_enemy in any::<bool>()
    ) {
        let grid = seeded_grid(radius, &seeds);
        let config = GameConfig { stop_on_enemy, ..GameConfig::default() };
        let mut engine = RulesEngine::new(grid, config).unwrap();

        let legal = engine.legal_moves();
        prop_assume!(!legal.is_empty());
        let coord = legal[pick % legal.len()];

        let outcome = engine.make_move(coord, Player::One).unwrap();
        prop_assert_eq!(outcome.affected[0], coord);
        prop_assert!(check_move(engine.grid(), &outcome.affected).is_empty());
        prop_assert!(check_invariants(engine.grid()).is_empty());
    }

    /// Energy after a move is the energy before, plus one, plus what
    /// explosions handed out, minus what they released.
    #[test]
    fn prop_energy_accounting(
        radius in 0u16..=4,
        seeds in seeds(),
        pick in any::<usize>()
    ) {
        let grid = seeded_grid(radius, &seeds);
        let before = grid.total_energy();
        let mut engine = RulesEngine::new(grid, GameConfig::default()).unwrap();

        let legal = engine.legal_moves();
        prop_assume!(!legal.is_empty());
        let outcome = engine.make_move(legal[pick % legal.len()], Player::One).unwrap();
        let report = outcome.report;

        prop_assert_eq!(
            engine.grid().total_energy(),
            before + 1 + report.energy_distributed - report.energy_released
        );
        prop_assert!(report.energy_lost() >= u64::from(report.explosions));
    }

    /// After N successful moves player one is to move iff N is even.
    #[test]
    fn prop_turns_alternate(
        radius in 1u16..=3,
        picks in prop::collection::vec(any::<usize>(), 1..60)
    ) {
        let mut engine = RulesEngine::new(Grid::new(radius).unwrap(), GameConfig::default()).unwrap();
        let mut played = 0u32;

        for pick in picks {
            if engine.is_game_over() {
                break;
            }
            let legal = engine.legal_moves();
            if legal.is_empty() {
                break;
            }
            let player = engine.current_player();
            engine.make_move(legal[pick % legal.len()], player).unwrap();
            played += 1;

            let expected = if played % 2 == 0 { Player::One } else { Player::Two };
            prop_assert_eq!(engine.current_player(), expected);
            prop_assert_eq!(engine.turn_count(), played);
        }
    }

    /// A rejected move changes no cell, turn count or current player.
    #[test]
    fn prop_invalid_moves_change_nothing(
        seeds in seeds(),
        x in -4i32..=4,
        y in -4i32..=4,
        second in any::<bool>()
    ) {
        let grid = seeded_grid(2, &seeds);
        let mut engine = RulesEngine::new(grid, GameConfig::default()).unwrap();
        let player = if second { Player::Two } else { Player::One };
        let coord = Coord::new(x, y);
        prop_assume!(!engine.is_valid_move(coord, player));

        let before = snapshot(engine.grid());
        let err = engine.make_move(coord, player).unwrap_err();

        prop_assert!(matches!(err, GameError::InvalidMove(_)));
        prop_assert_eq!(snapshot(engine.grid()), before);
        prop_assert_eq!(engine.turn_count(), 0);
        prop_assert_eq!(engine.current_player(), Player::One);
    }

    /// A fault at any point of a cascade leaves the grid exactly as it was.
    #[test]
    fn prop_fault_rolls_back(
        radius in 1u16..=3,
        seeds in seeds(),
        pick in any::<usize>(),
        limit in 0usize..40
    ) {
        let grid = seeded_grid(radius, &seeds);
        let before = snapshot(&grid);
        let mut engine = RulesEngine::new(grid, GameConfig::default()).unwrap();

        let legal = engine.legal_moves();
        prop_assume!(!legal.is_empty());
        let coord = legal[pick % legal.len()];

        match engine.make_move_probed(coord, Player::One, &mut FailAfter::new(limit)) {
            Ok(outcome) => {
                prop_assert!(outcome.report.changes_recorded <= limit);
                prop_assert_eq!(engine.turn_count(), 1);
            }
            Err(err) => {
                prop_assert!(matches!(err, GameError::CascadeAborted(_)));
                prop_assert_eq!(snapshot(engine.grid()), before);
                prop_assert_eq!(engine.turn_count(), 0);
                prop_assert_eq!(engine.current_player(), Player::One);
            }
        }
    }
}
