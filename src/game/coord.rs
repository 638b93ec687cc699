//! Coordinates and compass directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A coordinate on the grid.
///
/// The origin sits at the center of the grid; `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Coord {
    /// The grid origin.
    pub const ORIGIN: Coord = Coord::new(0, 0);

    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away in `direction`.
    ///
    /// Saturates at the `i32` bounds instead of wrapping.
    #[must_use]
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of compass directions.
pub const NUM_DIRECTIONS: usize = 8;

/// The eight compass directions in 45° steps, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// North (0°).
    #[default]
    N = 0,
    /// North-east (45°).
    NE = 1,
    /// East (90°).
    E = 2,
    /// South-east (135°).
    SE = 3,
    /// South (180°).
    S = 4,
    /// South-west (225°).
    SW = 5,
    /// West (270°).
    W = 6,
    /// North-west (315°).
    NW = 7,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Index of this direction in [`Direction::ALL`].
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 8.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % NUM_DIRECTIONS]
    }

    /// Unit offset `(dx, dy)` of one step in this direction.
    #[must_use]
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// Rotate 45° clockwise.
    #[must_use]
    pub const fn rotate_clockwise(self) -> Self {
        self.rotate_by(1)
    }

    /// Rotate 45° counter-clockwise.
    #[must_use]
    pub const fn rotate_counter_clockwise(self) -> Self {
        self.rotate_by(-1)
    }

    /// Rotate by `steps` 45° increments; negative steps turn counter-clockwise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub const fn rotate_by(self, steps: i32) -> Self {
        let n = NUM_DIRECTIONS as i32;
        let index = (self as i32 + steps % n).rem_euclid(n);
        Self::ALL[index as usize]
    }

    /// The direction pointing the other way.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn opposite(self) -> Self {
        self.rotate_by(NUM_DIRECTIONS as i32 / 2)
    }

    /// Short compass label (`N`, `NE`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_clockwise_wraps() {
        assert_eq!(Direction::N.rotate_clockwise(), Direction::NE);
        assert_eq!(Direction::NW.rotate_clockwise(), Direction::N);
    }

    #[test]
    fn test_rotate_counter_clockwise_wraps() {
        assert_eq!(Direction::N.rotate_counter_clockwise(), Direction::NW);
        assert_eq!(Direction::NE.rotate_counter_clockwise(), Direction::N);
    }

    #[test]
    fn test_rotate_by_steps() {
        assert_eq!(Direction::N.rotate_by(2), Direction::E);
        assert_eq!(Direction::E.rotate_by(-1), Direction::NE);
        assert_eq!(Direction::S.rotate_by(8), Direction::S);
        assert_eq!(Direction::S.rotate_by(-17), Direction::SE);
        assert_eq!(Direction::W.rotate_by(i32::MIN), Direction::W);
    }

    #[test]
    fn test_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0), "{dir} and its opposite cancel");
        }
        assert_eq!(Direction::NE.opposite(), Direction::SW);
    }

    #[test]
    fn test_offsets_are_distinct_unit_steps() {
        let mut seen = std::collections::HashSet::new();
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
            assert_ne!((dx, dy), (0, 0));
            assert!(seen.insert((dx, dy)));
        }
    }

    #[test]
    fn test_index_round_trip() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(Direction::from_index(i), *dir);
        }
        assert_eq!(Direction::from_index(9), Direction::NE);
    }

    #[test]
    fn test_step() {
        let c = Coord::new(2, -3);
        assert_eq!(c.step(Direction::SE), Coord::new(3, -2));
        assert_eq!(Coord::new(i32::MAX, 0).step(Direction::E), Coord::new(i32::MAX, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(-1, 4).to_string(), "(-1, 4)");
        assert_eq!(Direction::SW.to_string(), "SW");
    }
}
