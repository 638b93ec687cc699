//! Cells and their ownership states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Coord, Direction, NUM_DIRECTIONS, Player};

/// Ownership state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Unowned; either player may claim it.
    #[default]
    Neutral = 0,
    /// Owned by player one.
    Player1 = 1,
    /// Owned by player two.
    Player2 = 2,
    /// Permanently blocked; never captured, never explodes.
    Blocked = 3,
}

impl CellState {
    /// The owning player, if any.
    #[must_use]
    pub const fn player(self) -> Option<Player> {
        match self {
            CellState::Player1 => Some(Player::One),
            CellState::Player2 => Some(Player::Two),
            CellState::Neutral | CellState::Blocked => None,
        }
    }

    /// Check if the cell can never take part in play.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, CellState::Blocked)
    }

    /// Check if `player` may play on a cell in this state.
    #[must_use]
    pub fn playable_by(self, player: Player) -> bool {
        self == CellState::Neutral || self == player.cell_state()
    }

    /// Check if this cell belongs to the opponent of `player`.
    #[must_use]
    pub fn is_enemy_of(self, player: Player) -> bool {
        self.player().is_some_and(|owner| owner != player)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Neutral => f.write_str("neutral"),
            CellState::Player1 => f.write_str("player 1"),
            CellState::Player2 => f.write_str("player 2"),
            CellState::Blocked => f.write_str("blocked"),
        }
    }
}

/// Index of a cell in its grid's cell store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u32);

impl CellId {
    /// Wrap a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single cell of the grid.
///
/// Neighbor links are indices into the owning grid; a cell never owns
/// another cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    state: CellState,
    energy: u32,
    facing: Direction,
    neighbors: [Option<CellId>; NUM_DIRECTIONS],
}

impl Cell {
    /// Create a neutral, empty cell facing north with no links.
    #[must_use]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            state: CellState::Neutral,
            energy: 0,
            facing: Direction::N,
            neighbors: [None; NUM_DIRECTIONS],
        }
    }

    /// Position of this cell.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Current ownership state.
    #[must_use]
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Current energy.
    #[must_use]
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Neighbor link in `direction`, `None` at the edge of the grid.
    #[must_use]
    #[inline]
    pub const fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Live neighbor links with their directions.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CellId)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbors[dir.index()].map(|id| (dir, id)))
    }

    /// Number of live neighbor links, blocked neighbors included.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn live_neighbor_count(&self) -> u32 {
        self.neighbors.iter().filter(|n| n.is_some()).count() as u32
    }

    /// Check if the cell must explode.
    #[must_use]
    #[inline]
    pub fn is_unstable(&self) -> bool {
        !self.state.is_blocked() && self.energy > self.live_neighbor_count()
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub(crate) fn set_energy(&mut self, energy: u32) {
        self.energy = energy;
    }

    pub(crate) fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    pub(crate) fn link(&mut self, direction: Direction, neighbor: CellId) {
        self.neighbors[direction.index()] = Some(neighbor);
    }
}
