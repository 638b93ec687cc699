//! Hooks into the cascade.
//!
//! A probe sees every cell mutation of a move just before it happens and may
//! abort the move. The engine treats an abort like any other mid-cascade
//! failure, so probes are how tests drive the rollback path.

use crate::game::Coord;

/// Observer called before each cell mutation during a move.
pub trait CascadeProbe {
    /// Called before the cell at `coord` is mutated.
    ///
    /// `step` counts mutations of the current move, starting at 1.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the move with that message.
    fn before_change(&mut self, step: usize, coord: Coord) -> Result<(), String>;
}

/// Probe that never interferes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl CascadeProbe for NoProbe {
    #[inline]
    fn before_change(&mut self, _step: usize, _coord: Coord) -> Result<(), String> {
        Ok(())
    }
}

/// Probe that aborts the move once `limit` mutations have gone through.
#[derive(Debug, Clone, Copy)]
pub struct FailAfter {
    limit: usize,
    seen: usize,
}

impl FailAfter {
    /// Abort on the mutation following the first `limit`.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }

    /// Mutations let through so far.
    #[must_use]
    pub const fn seen(&self) -> usize {
        self.seen
    }
}

impl CascadeProbe for FailAfter {
    fn before_change(&mut self, step: usize, coord: Coord) -> Result<(), String> {
        if self.seen >= self.limit {
            return Err(format!("injected fault at step {step} on {coord}"));
        }
        self.seen += 1;
        Ok(())
    }
}

/// Probe that records every mutated coordinate in order.
#[derive(Debug, Clone, Default)]
pub struct TraceProbe {
    /// Coordinates in mutation order.
    pub touched: Vec<Coord>,
}

impl CascadeProbe for TraceProbe {
    fn before_change(&mut self, _step: usize, coord: Coord) -> Result<(), String> {
        self.touched.push(coord);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_after_limit() {
        let mut probe = FailAfter::new(2);
        assert!(probe.before_change(1, Coord::ORIGIN).is_ok());
        assert!(probe.before_change(2, Coord::ORIGIN).is_ok());
        let err = probe.before_change(3, Coord::new(1, 0)).unwrap_err();
        assert!(err.contains("step 3"));
        assert_eq!(probe.seen(), 2);
    }

    #[test]
    fn test_fail_after_zero_fails_immediately() {
        let mut probe = FailAfter::new(0);
        assert!(probe.before_change(1, Coord::ORIGIN).is_err());
    }

    #[test]
    fn test_trace_probe_records() {
        let mut probe = TraceProbe::default();
        probe.before_change(1, Coord::new(1, 1)).unwrap();
        probe.before_change(2, Coord::ORIGIN).unwrap();
        assert_eq!(probe.touched, vec![Coord::new(1, 1), Coord::ORIGIN]);
    }
}
