//! Trajectory runner: drives an integrator over a time grid.

use pd_core::{TimeGrid, Tolerances};

use crate::error::{SimError, SimResult};
use crate::integrator::{Integrator, Rk4, Rkf45};
use crate::model::DynamicModel;

/// Step-size controller constants for the adaptive method.
const SAFETY: f64 = 0.9;
const MIN_SHRINK: f64 = 0.2;
const MAX_GROW: f64 = 5.0;

/// Integrator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Fixed-step 4th-order Runge-Kutta, one step per grid interval.
    Rk4,
    /// Adaptive RKF45 with local error control (default).
    #[default]
    Rkf45,
}

/// Options for a trajectory run.
#[derive(Clone, Debug)]
pub struct IntegrateOptions {
    /// Integrator type (default: RKF45)
    pub integrator: IntegratorType,
    /// Local error tolerances for the adaptive method
    pub tolerances: Tolerances,
    /// Total internal-step budget across the whole run (safety limit)
    pub max_steps: usize,
    /// Smallest internal step the adaptive method may take
    pub min_dt: f64,
}

impl Default for IntegrateOptions {
    fn default() -> Self {
        Self {
            integrator: IntegratorType::default(),
            tolerances: Tolerances::default(),
            max_steps: 1_000_000,
            min_dt: 1e-12,
        }
    }
}

/// A solved trajectory: one state per grid point.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<S> {
    /// Grid times (seconds)
    pub t: Vec<f64>,
    /// State snapshots, aligned with `t`
    pub states: Vec<S>,
}

impl<S> Trajectory<S> {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Integrate `model` from `x0` across every point of `grid`.
///
/// Internal steps may subdivide a grid interval (the adaptive method decides
/// its own step sizes), but every grid point is landed on exactly and the
/// output holds exactly one state per grid sample.
///
/// # Errors
/// - `InvalidConfiguration` for bad options
/// - `IntegrationFailure` when the step budget runs out or the adaptive step
///   underflows `min_dt`; the error reports the last time reached
pub fn integrate<M: DynamicModel>(
    model: &M,
    grid: &TimeGrid,
    x0: M::State,
    opts: &IntegrateOptions,
) -> SimResult<Trajectory<M::State>> {
    if opts.max_steps == 0 {
        return Err(SimError::InvalidConfiguration {
            what: "max_steps must be positive",
        });
    }
    if opts.min_dt <= 0.0 {
        return Err(SimError::InvalidConfiguration {
            what: "min_dt must be positive",
        });
    }
    if opts.tolerances.abs <= 0.0 || opts.tolerances.rel < 0.0 {
        return Err(SimError::InvalidConfiguration {
            what: "tolerances must be positive",
        });
    }

    let times = grid.times();
    tracing::debug!(
        samples = times.len(),
        t_end = grid.end(),
        integrator = ?opts.integrator,
        "integrating over time grid"
    );

    let mut states = Vec::with_capacity(times.len());
    states.push(x0.clone());
    let mut x = x0;
    let mut steps_used = 0usize;

    match opts.integrator {
        IntegratorType::Rk4 => {
            let rk4 = Rk4;
            for window in times.windows(2) {
                if steps_used >= opts.max_steps {
                    return Err(SimError::IntegrationFailure {
                        t_reached: window[0],
                        what: "step budget exhausted",
                    });
                }
                x = rk4.step(model, window[0], &x, window[1] - window[0])?;
                steps_used += 1;
                states.push(x.clone());
            }
        }
        IntegratorType::Rkf45 => {
            let rkf = Rkf45;
            let mut dt = grid.step();
            for window in times.windows(2) {
                let t_target = window[1];
                let mut t = window[0];
                while t < t_target {
                    if steps_used >= opts.max_steps {
                        return Err(SimError::IntegrationFailure {
                            t_reached: t,
                            what: "step budget exhausted",
                        });
                    }
                    // Land exactly on the grid point when the controller's
                    // step would overshoot it.
                    let last = dt >= t_target - t;
                    let h = if last { t_target - t } else { dt };

                    let (x_new, err) = rkf.try_step(model, t, &x, h, &opts.tolerances)?;
                    steps_used += 1;

                    if err <= 1.0 {
                        t = if last { t_target } else { t + h };
                        x = x_new;
                        let grow = (SAFETY * err.powf(-0.2)).clamp(MIN_SHRINK, MAX_GROW);
                        dt = (h * grow).max(opts.min_dt);
                    } else {
                        let shrink = (SAFETY * err.powf(-0.2)).clamp(MIN_SHRINK, 1.0);
                        dt = h * shrink;
                        if dt < opts.min_dt {
                            return Err(SimError::IntegrationFailure {
                                t_reached: t,
                                what: "step size underflow",
                            });
                        }
                    }
                }
                states.push(x.clone());
            }
        }
    }

    tracing::debug!(steps = steps_used, "integration complete");
    Ok(Trajectory { t: times, states })
}
