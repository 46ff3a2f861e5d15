//! Time grids shared by every pipeline stage.

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Strictly increasing sequence of sample times, fixed at configuration.
///
/// Every stage of the pipeline (integration, post-processing, sampling)
/// indexes its output by the same grid, so trajectories stay aligned
/// index-for-index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    start: Real,
    end: Real,
    samples: usize,
}

impl TimeGrid {
    /// Create a grid of `samples` evenly spaced times over `[start, end]`.
    ///
    /// Rejects non-finite bounds, `end <= start`, and fewer than two samples.
    pub fn new(start: Real, end: Real, samples: usize) -> CoreResult<Self> {
        if !start.is_finite() {
            return Err(CoreError::NonFinite {
                what: "time grid start",
                value: start,
            });
        }
        if !end.is_finite() {
            return Err(CoreError::NonFinite {
                what: "time grid end",
                value: end,
            });
        }
        if end <= start {
            return Err(CoreError::InvalidArg {
                what: "time grid end must be after start",
            });
        }
        if samples < 2 {
            return Err(CoreError::InvalidArg {
                what: "time grid needs at least two samples",
            });
        }
        Ok(Self {
            start,
            end,
            samples,
        })
    }

    pub fn start(&self) -> Real {
        self.start
    }

    pub fn end(&self) -> Real {
        self.end
    }

    /// Number of grid points (including both endpoints).
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Spacing between adjacent grid points.
    pub fn step(&self) -> Real {
        (self.end - self.start) / (self.samples - 1) as Real
    }

    /// Materialize the grid times. Both endpoints are exact.
    pub fn times(&self) -> Vec<Real> {
        let dt = self.step();
        let mut t: Vec<Real> = (0..self.samples)
            .map(|i| self.start + i as Real * dt)
            .collect();
        // Pin the last sample so accumulated rounding never moves the horizon.
        t[self.samples - 1] = self.end;
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_degenerate_grids() {
        assert!(TimeGrid::new(0.0, 0.0, 10).is_err());
        assert!(TimeGrid::new(1.0, 0.0, 10).is_err());
        assert!(TimeGrid::new(0.0, 1.0, 1).is_err());
        assert!(TimeGrid::new(0.0, 1.0, 0).is_err());
        assert!(TimeGrid::new(Real::NAN, 1.0, 10).is_err());
        assert!(TimeGrid::new(0.0, Real::INFINITY, 10).is_err());
    }

    #[test]
    fn endpoints_are_exact() {
        let grid = TimeGrid::new(0.1, 0.7, 7).unwrap();
        let t = grid.times();
        assert_eq!(t.len(), 7);
        assert_eq!(t[0], 0.1);
        assert_eq!(t[6], 0.7);
    }

    #[test]
    fn step_matches_span() {
        let grid = TimeGrid::new(0.0, 1.0, 11).unwrap();
        assert!((grid.step() - 0.1).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn times_strictly_increase(
            start in -1e3..1e3f64,
            span in 0.1..1e3f64,
            samples in 2..1000usize,
        ) {
            let grid = TimeGrid::new(start, start + span, samples).unwrap();
            let t = grid.times();
            prop_assert_eq!(t.len(), samples);
            for pair in t.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
        }
    }
}
