//! Time integrators: fixed-step RK4 and the adaptive RKF45 embedded pair.

use pd_core::Tolerances;

use crate::error::SimResult;
use crate::model::DynamicModel;

/// Trait for one-step time integrators.
pub trait Integrator {
    /// Advance state by one time step of size dt.
    fn step<M: DynamicModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// base + dt * sum(w_i * k_i), the tableau combination every RK stage needs.
fn weighted<M: DynamicModel>(
    model: &M,
    base: &M::State,
    dt: f64,
    terms: &[(f64, &M::State)],
) -> M::State {
    let mut acc = base.clone();
    for (w, k) in terms {
        acc = model.add(&acc, &model.scale(k, dt * w));
    }
    acc
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step<M: DynamicModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;
        let k2 = model.rhs(t + 0.5 * dt, &weighted(model, x, dt, &[(0.5, &k1)]))?;
        let k3 = model.rhs(t + 0.5 * dt, &weighted(model, x, dt, &[(0.5, &k2)]))?;
        let k4 = model.rhs(t + dt, &weighted(model, x, dt, &[(1.0, &k3)]))?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        Ok(weighted(
            model,
            x,
            dt / 6.0,
            &[(1.0, &k1), (2.0, &k2), (2.0, &k3), (1.0, &k4)],
        ))
    }
}

/// Runge-Kutta-Fehlberg 4(5) embedded pair.
///
/// Six stages yield a 4th- and a 5th-order solution; their difference is the
/// local error estimate that drives step-size control in the runner. The
/// 5th-order solution is the one propagated.
#[derive(Clone, Debug)]
pub struct Rkf45;

impl Rkf45 {
    /// Attempt one step of size dt.
    ///
    /// Returns the 5th-order solution together with the scaled local error:
    /// a value <= 1 means the step is within `tol`.
    pub fn try_step<M: DynamicModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
        tol: &Tolerances,
    ) -> SimResult<(M::State, f64)> {
        let k1 = model.rhs(t, x)?;
        let x2 = weighted(model, x, dt, &[(1.0 / 4.0, &k1)]);
        let k2 = model.rhs(t + dt / 4.0, &x2)?;
        let x3 = weighted(model, x, dt, &[(3.0 / 32.0, &k1), (9.0 / 32.0, &k2)]);
        let k3 = model.rhs(t + 3.0 * dt / 8.0, &x3)?;
        let x4 = weighted(
            model,
            x,
            dt,
            &[
                (1932.0 / 2197.0, &k1),
                (-7200.0 / 2197.0, &k2),
                (7296.0 / 2197.0, &k3),
            ],
        );
        let k4 = model.rhs(t + 12.0 * dt / 13.0, &x4)?;
        let x5 = weighted(
            model,
            x,
            dt,
            &[
                (439.0 / 216.0, &k1),
                (-8.0, &k2),
                (3680.0 / 513.0, &k3),
                (-845.0 / 4104.0, &k4),
            ],
        );
        let k5 = model.rhs(t + dt, &x5)?;
        let x6 = weighted(
            model,
            x,
            dt,
            &[
                (-8.0 / 27.0, &k1),
                (2.0, &k2),
                (-3544.0 / 2565.0, &k3),
                (1859.0 / 4104.0, &k4),
                (-11.0 / 40.0, &k5),
            ],
        );
        let k6 = model.rhs(t + dt / 2.0, &x6)?;

        let fourth = weighted(
            model,
            x,
            dt,
            &[
                (25.0 / 216.0, &k1),
                (1408.0 / 2565.0, &k3),
                (2197.0 / 4104.0, &k4),
                (-1.0 / 5.0, &k5),
            ],
        );
        let fifth = weighted(
            model,
            x,
            dt,
            &[
                (16.0 / 135.0, &k1),
                (6656.0 / 12825.0, &k3),
                (28561.0 / 56430.0, &k4),
                (-9.0 / 50.0, &k5),
                (2.0 / 55.0, &k6),
            ],
        );

        let diff = model.add(&fifth, &model.scale(&fourth, -1.0));
        let scale = model.norm(x).max(model.norm(&fifth));
        let scaled_error = model.norm(&diff) / tol.margin(scale);

        Ok((fifth, scaled_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimResult;

    /// dx/dt = -rate * x, exact solution x0 * exp(-rate * t).
    struct Decay {
        rate: f64,
    }

    impl DynamicModel for Decay {
        type State = f64;

        fn rhs(&self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-self.rate * x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }

        fn norm(&self, a: &f64) -> f64 {
            a.abs()
        }
    }

    #[test]
    fn rk4_matches_exponential() {
        let model = Decay { rate: 2.0 };
        let rk4 = Rk4;
        let dt = 1e-3;
        let mut x = 1.0;
        let mut t = 0.0;
        for _ in 0..1000 {
            x = rk4.step(&model, t, &x, dt).unwrap();
            t += dt;
        }
        let exact = (-2.0f64).exp();
        assert!((x - exact).abs() < 1e-10);
    }

    #[test]
    fn rkf45_error_estimate_shrinks_with_step() {
        let model = Decay { rate: 2.0 };
        let rkf = Rkf45;
        let tol = Tolerances {
            abs: 1e-12,
            rel: 0.0,
        };
        let (_, err_coarse) = rkf.try_step(&model, 0.0, &1.0, 0.1, &tol).unwrap();
        let (_, err_fine) = rkf.try_step(&model, 0.0, &1.0, 0.01, &tol).unwrap();
        // Local error is O(dt^5): a 10x smaller step must shrink it by orders
        // of magnitude.
        assert!(err_fine < err_coarse * 1e-3);
    }

    #[test]
    fn rkf45_solution_is_accurate() {
        let model = Decay { rate: 2.0 };
        let rkf = Rkf45;
        let tol = Tolerances::default();
        let (x, _) = rkf.try_step(&model, 0.0, &1.0, 0.01, &tol).unwrap();
        let exact = (-2.0f64 * 0.01).exp();
        assert!((x - exact).abs() < 1e-12);
    }
}
