//! Undo log for a single move.

use crate::error::{EngineResult, GameError};
use crate::game::{Cell, CellId, CellState, Direction, Grid};

/// Pre-mutation snapshot of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    /// The cell that was about to change.
    pub cell: CellId,
    /// Owner state before the change.
    pub state: CellState,
    /// Facing before the change.
    pub facing: Direction,
    /// Energy before the change.
    pub energy: u32,
}

impl CellChange {
    /// Snapshot `cell`, stored under `id`.
    #[must_use]
    pub const fn capture(id: CellId, cell: &Cell) -> Self {
        Self {
            cell: id,
            state: cell.state(),
            facing: cell.facing(),
            energy: cell.energy(),
        }
    }

    /// Write the snapshot back into `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RollbackFailure`] if the cell no longer exists.
    pub fn restore(&self, grid: &mut Grid) -> EngineResult<()> {
        let cell = grid
            .cell_mut(self.cell)
            .ok_or(GameError::RollbackFailure(self.cell))?;
        cell.set_state(self.state);
        cell.set_facing(self.facing);
        cell.set_energy(self.energy);
        Ok(())
    }
}

/// Ordered record of cell snapshots taken during one move.
///
/// Entries are appended in causal order and replayed newest first, so a
/// cell touched several times ends up in its oldest recorded state.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<CellChange>,
}

impl ChangeLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot.
    pub fn record(&mut self, change: CellChange) {
        self.entries.push(change);
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded snapshots in causal order.
    #[must_use]
    pub fn entries(&self) -> &[CellChange] {
        &self.entries
    }

    /// Restore every recorded cell, newest entry first, consuming the log.
    ///
    /// # Errors
    ///
    /// Stops at the first entry whose cell is missing and returns
    /// [`GameError::RollbackFailure`].
    pub fn rollback(self, grid: &mut Grid) -> EngineResult<()> {
        for change in self.entries.iter().rev() {
            change.restore(grid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Coord;

    #[test]
    fn test_rollback_restores_oldest_snapshot() {
        let mut grid = Grid::new(1).unwrap();
        let id = grid.at(Coord::ORIGIN).unwrap();
        let mut log = ChangeLog::new();

        log.record(CellChange::capture(id, grid.cell(id).unwrap()));
        grid.seed(Coord::ORIGIN, CellState::Player1, 3);
        log.record(CellChange::capture(id, grid.cell(id).unwrap()));
        grid.seed(Coord::ORIGIN, CellState::Player2, 0);
        grid.set_facing(Coord::ORIGIN, Direction::E);
        assert_eq!(log.len(), 2);

        log.rollback(&mut grid).unwrap();
        let cell = grid.get(Coord::ORIGIN).unwrap();
        assert_eq!(cell.state(), CellState::Neutral);
        assert_eq!(cell.energy(), 0);
        assert_eq!(cell.facing(), Direction::N);
    }

    #[test]
    fn test_rollback_of_foreign_cell_fails() {
        let mut small = Grid::new(0).unwrap();
        let big = Grid::new(2).unwrap();
        let far = big.at(Coord::new(2, 2)).unwrap();

        let mut log = ChangeLog::new();
        log.record(CellChange::capture(far, big.cell(far).unwrap()));
        assert_eq!(log.rollback(&mut small), Err(GameError::RollbackFailure(far)));
    }

    #[test]
    fn test_empty_log() {
        let mut grid = Grid::new(0).unwrap();
        let log = ChangeLog::new();
        assert!(log.is_empty());
        assert!(log.entries().is_empty());
        assert!(log.rollback(&mut grid).is_ok());
    }
}
