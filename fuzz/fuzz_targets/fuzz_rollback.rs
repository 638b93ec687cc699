#![no_main]

//! Rollback fuzzer.
//!
//! Injects a fault after an arbitrary number of cell mutations and checks
//! that the grid comes back bit-for-bit.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use octa::game::{Cell, CellState, Coord, Direction, FailAfter, GameConfig, Grid, Player, RulesEngine};

/// Structured input for rollback fuzzing.
#[derive(Arbitrary, Debug)]
struct RollbackInput {
    radius: u8,
    cells: Vec<(u8, u8, u16, u8)>,
    target: u8,
    fail_after: u8,
}

fuzz_target!(|input: RollbackInput| {
    let radius = u16::from(input.radius % 5);
    let Some(mut grid) = Grid::new(radius) else {
        return;
    };
    let coords: Vec<Coord> = grid.iter().map(|(_, cell)| cell.coord()).collect();

    for &(pick, kind, energy, facing) in input.cells.iter().take(40) {
        let coord = coords[usize::from(pick) % coords.len()];
        let state = match kind % 3 {
            0 => CellState::Neutral,
            1 => CellState::Player1,
            _ => CellState::Player2,
        };
        grid.seed(coord, state, u32::from(energy % 256));
        grid.set_facing(coord, Direction::from_index(usize::from(facing)));
    }

    let before: Vec<Cell> = grid.iter().map(|(_, cell)| *cell).collect();
    let Ok(mut engine) = RulesEngine::new(grid, GameConfig::default()) else {
        return;
    };
    let target = coords[usize::from(input.target) % coords.len()];
    if !engine.is_valid_move(target, Player::One) {
        return;
    }

    let mut probe = FailAfter::new(usize::from(input.fail_after));
    if engine.make_move_probed(target, Player::One, &mut probe).is_err() {
        let after: Vec<Cell> = engine.grid().iter().map(|(_, cell)| *cell).collect();
        assert_eq!(before, after, "rollback did not restore the grid");
        assert_eq!(engine.turn_count(), 0);
    }
});
