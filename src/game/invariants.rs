//! Grid invariants - sanity checks that detect bugs.
//!
//! These should never trigger on a grid built by [`Grid::new`] and mutated
//! only through the rules engine. If they do, it indicates a bug.

use thiserror::Error;

use crate::game::{Coord, Direction, Grid};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

/// Check the structural invariants of a grid.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let side = 2 * usize::from(grid.radius()) + 1;
    if grid.len() != side * side {
        violations.push(InvariantViolation {
            message: format!(
                "Grid of radius {} has {} cells, expected {}",
                grid.radius(),
                grid.len(),
                side * side
            ),
        });
    }

    for (id, cell) in grid.iter() {
        let coord = cell.coord();

        if grid.at(coord) != Some(id) {
            violations.push(InvariantViolation {
                message: format!("Cell {id} at {coord} is not indexed under its coordinate"),
            });
        }

        if cell.state().is_blocked() && cell.energy() > 0 {
            violations.push(InvariantViolation {
                message: format!("Blocked cell at {coord} holds energy {}", cell.energy()),
            });
        }

        for dir in Direction::ALL {
            let expected = grid.at(coord.step(dir));
            let linked = cell.neighbor(dir);
            if linked != expected {
                violations.push(InvariantViolation {
                    message: format!("Cell at {coord} has a wrong {dir} link"),
                });
                continue;
            }
            if let Some(other) = linked
                && grid.neighbor(other, dir.opposite()) != Some(id)
            {
                violations.push(InvariantViolation {
                    message: format!("Link {dir} from {coord} is not mirrored"),
                });
            }
        }
    }

    violations
}

/// Check the cells a finished move touched.
///
/// Every affected cell must exist, must not be blocked and must be stable.
#[must_use]
pub fn check_move(grid: &Grid, affected: &[Coord]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for &coord in affected {
        let Some(cell) = grid.get(coord) else {
            violations.push(InvariantViolation {
                message: format!("Affected cell {coord} is not on the grid"),
            });
            continue;
        };
        if cell.state().is_blocked() {
            violations.push(InvariantViolation {
                message: format!("Move touched blocked cell {coord}"),
            });
        }
        if cell.is_unstable() {
            violations.push(InvariantViolation {
                message: format!(
                    "Cell {coord} left unstable with energy {} and {} neighbors",
                    cell.energy(),
                    cell.live_neighbor_count()
                ),
            });
        }
    }

    violations
}

/// Assert all grid invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &Grid) {
    let violations = check_invariants(grid);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Grid invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &Grid) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CellState;

    #[test]
    fn test_fresh_grids_pass() {
        for radius in 0..5 {
            let grid = Grid::new(radius).unwrap();
            let violations = check_invariants(&grid);
            assert!(violations.is_empty(), "radius {radius}: {violations:?}");
        }
    }

    #[test]
    fn test_seeded_grid_passes() {
        let mut grid = Grid::new(2).unwrap();
        grid.block(Coord::new(1, 1));
        grid.seed(Coord::ORIGIN, CellState::Player2, 40);
        assert!(check_invariants(&grid).is_empty());
        assert_invariants(&grid);
    }

    #[test]
    fn test_blocked_cell_with_energy_detected() {
        let mut grid = Grid::new(1).unwrap();
        grid.block(Coord::ORIGIN);
        let id = grid.at(Coord::ORIGIN).unwrap();
        grid.cell_mut(id).unwrap().set_energy(2);

        let violations = check_invariants(&grid);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Blocked"));
    }

    #[test]
    fn test_clean_move_passes() {
        let mut grid = Grid::new(1).unwrap();
        grid.seed(Coord::ORIGIN, CellState::Player1, 8);
        assert!(check_move(&grid, &[Coord::ORIGIN]).is_empty());
    }

    #[test]
    fn test_unstable_cell_detected() {
        let mut grid = Grid::new(1).unwrap();
        grid.seed(Coord::new(1, 1), CellState::Player1, 4);

        let violations = check_move(&grid, &[Coord::ORIGIN, Coord::new(1, 1)]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("unstable"));
    }

    #[test]
    fn test_blocked_and_missing_cells_detected() {
        let mut grid = Grid::new(1).unwrap();
        grid.block(Coord::ORIGIN);

        let violations = check_move(&grid, &[Coord::ORIGIN, Coord::new(5, 5)]);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.message.contains("blocked")));
        assert!(violations.iter().any(|v| v.message.contains("not on the grid")));
    }

    #[test]
    fn test_display() {
        let violation = InvariantViolation {
            message: "boom".to_string(),
        };
        assert_eq!(violation.to_string(), "Invariant violation: boom");
    }
}
