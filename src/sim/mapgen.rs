//! Deterministic grid generation.

// Map generation uses intentional casts for RNG operations
#![allow(clippy::cast_possible_truncation)]

use crate::error::{EngineResult, GameError};
use crate::game::{Coord, Grid, MAX_RADIUS};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    pub(crate) const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    pub(crate) fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Pick an index in [0, len).
    pub(crate) fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

/// Generate a grid of `radius` with roughly `blocked_percent` of its cells blocked.
///
/// Blocking is point-symmetric around the origin so neither player starts
/// with a better half, and the origin itself is never blocked.
///
/// # Errors
///
/// Returns [`GameError::InvalidConfiguration`] if the radius exceeds
/// [`MAX_RADIUS`] or `blocked_percent` exceeds 100.
pub fn generate_grid(seed: u64, radius: u16, blocked_percent: u8) -> EngineResult<Grid> {
    if blocked_percent > 100 {
        return Err(GameError::InvalidConfiguration(format!(
            "blocked percentage must be at most 100, got {blocked_percent}"
        )));
    }
    let mut grid = Grid::new(radius).ok_or_else(|| {
        GameError::InvalidConfiguration(format!(
            "radius must be at most {MAX_RADIUS}, got {radius}"
        ))
    })?;

    let mut rng = Rng::new(seed);
    let r = i32::from(radius);

    // Walk the half of the grid before the origin in row-major order; each
    // draw decides a cell and its mirror image.
    for y in -r..=0 {
        for x in -r..=r {
            if y == 0 && x >= 0 {
                break;
            }
            if rng.next_u32(100) < u32::from(blocked_percent) {
                grid.block(Coord::new(x, y));
                grid.block(Coord::new(-x, -y));
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_rng_bounds() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_u32(10) < 10);
            assert!(rng.next_index(3) < 3);
        }
        assert_eq!(rng.next_u32(0), 0);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = generate_grid(1234, 4, 20).unwrap();
        let b = generate_grid(1234, 4, 20).unwrap();
        for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_blocking_is_symmetric() {
        let grid = generate_grid(42, 5, 30).unwrap();
        let counts = grid.count_cells();
        assert!(counts.blocked > 0);
        assert_eq!(counts.blocked % 2, 0);
        for (_, cell) in grid.iter() {
            let c = cell.coord();
            let mirror = grid.get(Coord::new(-c.x, -c.y)).unwrap();
            assert_eq!(cell.state(), mirror.state());
        }
        assert!(!grid.get(Coord::ORIGIN).unwrap().state().is_blocked());
    }

    #[test]
    fn test_zero_percent_blocks_nothing() {
        let grid = generate_grid(5, 3, 0).unwrap();
        assert_eq!(grid.count_cells().blocked, 0);
    }

    #[test]
    fn test_full_block_keeps_origin() {
        let grid = generate_grid(5, 2, 100).unwrap();
        let counts = grid.count_cells();
        assert_eq!(counts.blocked, 24);
        assert_eq!(counts.neutral, 1);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            generate_grid(1, 3, 101),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            generate_grid(1, MAX_RADIUS + 1, 0),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
}
