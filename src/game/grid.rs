//! The cell grid and its adjacency graph.

use std::collections::{HashMap, VecDeque};

use crate::game::{Cell, CellId, CellState, Coord, Direction, Player};

/// Largest supported grid radius.
///
/// A radius of 512 gives 1025 × 1025 cells.
pub const MAX_RADIUS: u16 = 512;

/// Per-state cell totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Cells owned by player one.
    pub player1: u32,
    /// Cells owned by player two.
    pub player2: u32,
    /// Unowned cells.
    pub neutral: u32,
    /// Blocked cells.
    pub blocked: u32,
}

impl CellCounts {
    /// Cells owned by `player`.
    #[must_use]
    pub const fn for_player(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Total number of counted cells.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.player1 + self.player2 + self.neutral + self.blocked
    }

    fn add(&mut self, state: CellState) {
        match state {
            CellState::Neutral => self.neutral += 1,
            CellState::Player1 => self.player1 += 1,
            CellState::Player2 => self.player2 += 1,
            CellState::Blocked => self.blocked += 1,
        }
    }
}

/// A square grid of cells centered on the origin.
///
/// The grid is the only owner of its cells. Adjacency is fixed at
/// construction; cell contents change, the graph shape does not.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Distance from the origin to the edge.
    radius: u16,
    /// Cell store; neighbor links index into it.
    cells: Vec<Cell>,
    /// Coordinate lookup.
    index: HashMap<Coord, CellId>,
}

impl Grid {
    /// Create a grid spanning `(-radius, -radius)` to `(radius, radius)`.
    ///
    /// Every cell starts neutral with zero energy, facing north.
    /// Returns `None` if `radius` exceeds [`MAX_RADIUS`].
    #[must_use]
    pub fn new(radius: u16) -> Option<Self> {
        if radius > MAX_RADIUS {
            return None;
        }

        let r = i32::from(radius);
        let side = 2 * usize::from(radius) + 1;
        let mut cells = Vec::with_capacity(side * side);
        let mut index = HashMap::with_capacity(side * side);

        // First pass: create every cell.
        for y in -r..=r {
            for x in -r..=r {
                let coord = Coord::new(x, y);
                #[allow(clippy::cast_possible_truncation)]
                let id = CellId::new(cells.len() as u32);
                cells.push(Cell::new(coord));
                index.insert(coord, id);
            }
        }

        // Second pass: link neighbors now that every target exists.
        for cell in &mut cells {
            let coord = cell.coord();
            for dir in Direction::ALL {
                if let Some(&neighbor) = index.get(&coord.step(dir)) {
                    cell.link(dir, neighbor);
                }
            }
        }

        Some(Self {
            radius,
            cells,
            index,
        })
    }

    /// Distance from the origin to the edge of the grid.
    #[must_use]
    pub const fn radius(&self) -> u16 {
        self.radius
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid has no cells. Never true for a constructed grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Look up the cell at `coord`.
    #[must_use]
    #[inline]
    pub fn at(&self, coord: Coord) -> Option<CellId> {
        self.index.get(&coord).copied()
    }

    /// Check if a cell exists at `coord`.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.index.contains_key(&coord)
    }

    /// Get the cell at `coord`.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.at(coord).and_then(|id| self.cell(id))
    }

    /// Get a cell by id.
    #[must_use]
    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.index())
    }

    /// Neighbor of `id` in `direction`, if both exist.
    #[must_use]
    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.cell(id).and_then(|cell| cell.neighbor(direction))
    }

    /// Iterate over all cells in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = CellId::new(idx as u32);
            (id, cell)
        })
    }

    /// Sum of energy over all cells.
    #[must_use]
    pub fn total_energy(&self) -> u64 {
        self.cells.iter().map(|cell| u64::from(cell.energy())).sum()
    }

    /// Mark the cell at `coord` as blocked and drain its energy.
    ///
    /// Returns `false` if there is no such cell.
    pub fn block(&mut self, coord: Coord) -> bool {
        let Some(cell) = self.at(coord).and_then(|id| self.cell_mut(id)) else {
            return false;
        };
        cell.set_state(CellState::Blocked);
        cell.set_energy(0);
        true
    }

    /// Place an owner and energy on the cell at `coord` during setup.
    ///
    /// Returns `false` if there is no such cell, if it is blocked, or if
    /// `state` is [`CellState::Blocked`] (use [`Grid::block`] for that).
    pub fn seed(&mut self, coord: Coord, state: CellState, energy: u32) -> bool {
        if state.is_blocked() {
            return false;
        }
        let Some(cell) = self.at(coord).and_then(|id| self.cell_mut(id)) else {
            return false;
        };
        if cell.state().is_blocked() {
            return false;
        }
        cell.set_state(state);
        cell.set_energy(energy);
        true
    }

    /// Turn the cell at `coord` to face `direction`.
    ///
    /// Returns `false` if there is no such cell.
    pub fn set_facing(&mut self, coord: Coord, direction: Direction) -> bool {
        match self.at(coord).and_then(|id| self.cell_mut(id)) {
            Some(cell) => {
                cell.set_facing(direction);
                true
            }
            None => false,
        }
    }

    /// Return every non-blocked cell to neutral, zero energy, facing north.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| !c.state().is_blocked()) {
            cell.set_state(CellState::Neutral);
            cell.set_energy(0);
            cell.set_facing(Direction::N);
        }
    }

    /// Count cells per state, traversing the adjacency graph from the origin.
    #[must_use]
    pub fn count_cells(&self) -> CellCounts {
        self.count_cells_from(Coord::ORIGIN)
    }

    /// Count cells per state by breadth-first traversal from `start`.
    ///
    /// If `start` is not on the grid, falls back to a scan of the
    /// coordinate square bounded by the grid radius.
    #[must_use]
    pub fn count_cells_from(&self, start: Coord) -> CellCounts {
        let mut counts = CellCounts::default();

        let Some(start) = self.at(start) else {
            let r = i32::from(self.radius);
            for y in -r..=r {
                for x in -r..=r {
                    if let Some(cell) = self.get(Coord::new(x, y)) {
                        counts.add(cell.state());
                    }
                }
            }
            return counts;
        };

        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        visited[start.index()] = true;
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let Some(cell) = self.cell(id) else {
                continue;
            };
            counts.add(cell.state());
            for (_, neighbor) in cell.neighbors() {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_count() {
        for radius in 0..=4u16 {
            let grid = Grid::new(radius).unwrap();
            let side = 2 * usize::from(radius) + 1;
            assert_eq!(grid.len(), side * side);
            assert!(!grid.is_empty());
        }
    }

    #[test]
    fn test_grid_radius_limit() {
        assert!(Grid::new(MAX_RADIUS + 1).is_none());
    }

    #[test]
    fn test_lookup() {
        let grid = Grid::new(2).unwrap();
        assert!(grid.at(Coord::new(-2, 2)).is_some());
        assert!(grid.at(Coord::new(3, 0)).is_none());
        assert!(grid.contains(Coord::ORIGIN));
        let cell = grid.get(Coord::new(1, -1)).unwrap();
        assert_eq!(cell.coord(), Coord::new(1, -1));
        assert_eq!(cell.state(), CellState::Neutral);
    }

    #[test]
    fn test_neighbor_counts() {
        let grid = Grid::new(1).unwrap();
        assert_eq!(grid.get(Coord::ORIGIN).unwrap().live_neighbor_count(), 8);
        assert_eq!(grid.get(Coord::new(0, -1)).unwrap().live_neighbor_count(), 5);
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap().live_neighbor_count(), 3);

        let single = Grid::new(0).unwrap();
        assert_eq!(single.get(Coord::ORIGIN).unwrap().live_neighbor_count(), 0);
    }

    #[test]
    fn test_neighbor_links_are_symmetric() {
        let grid = Grid::new(3).unwrap();
        for (id, cell) in grid.iter() {
            for (dir, neighbor) in cell.neighbors() {
                assert_eq!(grid.neighbor(neighbor, dir.opposite()), Some(id));
                assert_eq!(grid.cell(neighbor).unwrap().coord(), cell.coord().step(dir));
            }
        }
    }

    #[test]
    fn test_block_and_seed() {
        let mut grid = Grid::new(1).unwrap();
        assert!(grid.seed(Coord::ORIGIN, CellState::Player1, 4));
        assert!(grid.block(Coord::ORIGIN));
        let cell = grid.get(Coord::ORIGIN).unwrap();
        assert_eq!(cell.state(), CellState::Blocked);
        assert_eq!(cell.energy(), 0);

        assert!(!grid.seed(Coord::ORIGIN, CellState::Player2, 1), "blocked cells stay blocked");
        assert!(!grid.seed(Coord::new(1, 0), CellState::Blocked, 0));
        assert!(!grid.seed(Coord::new(5, 5), CellState::Player1, 1));
        assert!(!grid.block(Coord::new(5, 5)));
    }

    #[test]
    fn test_clear_keeps_blocked() {
        let mut grid = Grid::new(1).unwrap();
        grid.block(Coord::new(1, 1));
        grid.seed(Coord::ORIGIN, CellState::Player2, 3);
        grid.set_facing(Coord::ORIGIN, Direction::SW);
        grid.clear();

        let center = grid.get(Coord::ORIGIN).unwrap();
        assert_eq!(center.state(), CellState::Neutral);
        assert_eq!(center.energy(), 0);
        assert_eq!(center.facing(), Direction::N);
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap().state(), CellState::Blocked);
    }

    #[test]
    fn test_count_cells_traversal() {
        let mut grid = Grid::new(2).unwrap();
        grid.seed(Coord::new(-2, -2), CellState::Player1, 1);
        grid.seed(Coord::new(2, 2), CellState::Player2, 1);
        grid.seed(Coord::new(2, 1), CellState::Player2, 1);
        grid.block(Coord::ORIGIN);

        let counts = grid.count_cells();
        assert_eq!(counts.player1, 1);
        assert_eq!(counts.player2, 2);
        assert_eq!(counts.blocked, 1);
        assert_eq!(counts.neutral, 21);
        assert_eq!(counts.total() as usize, grid.len());
        assert_eq!(counts.for_player(Player::Two), 2);
    }

    #[test]
    fn test_count_cells_fallback_scan_matches_traversal() {
        let mut grid = Grid::new(3).unwrap();
        grid.seed(Coord::new(3, -3), CellState::Player1, 2);
        grid.block(Coord::new(0, 1));
        let traversed = grid.count_cells();
        let scanned = grid.count_cells_from(Coord::new(100, 100));
        assert_eq!(traversed, scanned);
    }

    #[test]
    fn test_total_energy() {
        let mut grid = Grid::new(1).unwrap();
        grid.seed(Coord::ORIGIN, CellState::Player1, 5);
        grid.seed(Coord::new(1, 0), CellState::Neutral, 2);
        assert_eq!(grid.total_energy(), 7);
    }
}
