//! Equations of motion for the pulley-spring-pendulum rig.

use nalgebra::{Matrix2, Vector2};
use pd_core::ensure_finite;

use crate::error::{SimError, SimResult};
use crate::model::DynamicModel;

/// Determinant threshold below which the acceleration system is treated as
/// singular (relative to the magnitude of the diagonal).
const DET_EPS: f64 = 1e-12;

/// Generalized coordinates and velocities of the rig.
///
/// `x` is the spring-side block displacement (m), `phi` the cord swing angle
/// (rad); the remaining slots are their time derivatives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulleyState {
    /// Block displacement (m)
    pub x: f64,
    /// Swing angle (rad)
    pub phi: f64,
    /// Block velocity (m/s)
    pub x_dot: f64,
    /// Swing angular velocity (rad/s)
    pub phi_dot: f64,
}

impl PulleyState {
    /// State with the given displacements and zero velocities.
    pub fn at_rest(x: f64, phi: f64) -> Self {
        Self {
            x,
            phi,
            x_dot: 0.0,
            phi_dot: 0.0,
        }
    }
}

/// Physical constants of the rig.
#[derive(Clone, Copy, Debug)]
pub struct PulleyParams {
    /// Block mass M (kg)
    pub block_mass: f64,
    /// Swinging bob mass m (kg)
    pub bob_mass: f64,
    /// Nominal cord length l (m)
    pub cord_length: f64,
    /// Pulley radius r (m)
    pub pulley_radius: f64,
    /// Spring stiffness c (N/m)
    pub stiffness: f64,
    /// Gravitational acceleration g (m/s²)
    pub gravity: f64,
}

impl PulleyParams {
    /// Create a validated parameter set.
    ///
    /// Masses, cord length and pulley radius must be strictly positive.
    /// Stiffness and gravity must be non-negative: a slack spring (c = 0) and
    /// free fall turned off (g = 0) are legitimate limiting configurations.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for non-physical parameters.
    pub fn new(
        block_mass: f64,
        bob_mass: f64,
        cord_length: f64,
        pulley_radius: f64,
        stiffness: f64,
        gravity: f64,
    ) -> SimResult<Self> {
        ensure_finite(block_mass, "block mass")?;
        ensure_finite(bob_mass, "bob mass")?;
        ensure_finite(cord_length, "cord length")?;
        ensure_finite(pulley_radius, "pulley radius")?;
        ensure_finite(stiffness, "spring stiffness")?;
        ensure_finite(gravity, "gravity")?;

        if block_mass <= 0.0 {
            return Err(SimError::InvalidConfiguration {
                what: "block mass must be positive",
            });
        }
        if bob_mass <= 0.0 {
            return Err(SimError::InvalidConfiguration {
                what: "bob mass must be positive",
            });
        }
        if cord_length <= 0.0 {
            return Err(SimError::InvalidConfiguration {
                what: "cord length must be positive",
            });
        }
        if pulley_radius <= 0.0 {
            return Err(SimError::InvalidConfiguration {
                what: "pulley radius must be positive",
            });
        }
        if stiffness < 0.0 {
            return Err(SimError::InvalidConfiguration {
                what: "spring stiffness cannot be negative",
            });
        }
        if gravity < 0.0 {
            return Err(SimError::InvalidConfiguration {
                what: "gravity cannot be negative",
            });
        }

        Ok(Self {
            block_mass,
            bob_mass,
            cord_length,
            pulley_radius,
            stiffness,
            gravity,
        })
    }
}

/// The coupled translation/rotation dynamics of the rig.
///
/// Lagrangian mechanics reduce the rig to a 2x2 linear system in the
/// accelerations:
///
/// ```text
/// a11 * x_dd  + a12 * phi_dd = b1
/// a21 * x_dd  + a22 * phi_dd = b2
/// ```
///
/// with a11 = M/2 + m, a22 = l and zero off-diagonal coupling. The right-hand
/// sides collect gravity, the spring restoring force, the centrifugal term
/// m*l*phi_dot² and the Coriolis-like term phi_dot*(2*x_dot - r*phi_dot).
#[derive(Clone, Debug)]
pub struct PulleySystem {
    pub params: PulleyParams,
}

impl PulleySystem {
    pub fn new(params: PulleyParams) -> Self {
        Self { params }
    }

    /// Coefficient matrix of the acceleration system.
    fn coefficients(&self) -> Matrix2<f64> {
        let p = &self.params;
        Matrix2::new(
            p.block_mass / 2.0 + p.bob_mass,
            0.0,
            0.0,
            p.cord_length,
        )
    }

    /// Check an initial condition before integration starts.
    pub fn validate_initial(&self, state: &PulleyState) -> SimResult<()> {
        ensure_finite(state.x, "initial displacement")?;
        ensure_finite(state.phi, "initial angle")?;
        ensure_finite(state.x_dot, "initial velocity")?;
        ensure_finite(state.phi_dot, "initial angular velocity")?;
        Ok(())
    }

    /// Mechanical energy of the decoupled modes:
    /// kinetic `(M/2 + m)/2 * x_dot² + m*l²/2 * phi_dot²` plus spring and
    /// gravity potentials. Exactly conserved when one mode stays frozen;
    /// the regression tests track its drift.
    pub fn mechanical_energy(&self, state: &PulleyState) -> f64 {
        let p = &self.params;
        let a11 = p.block_mass / 2.0 + p.bob_mass;
        let kinetic = 0.5 * a11 * state.x_dot * state.x_dot
            + 0.5 * p.bob_mass * p.cord_length * p.cord_length * state.phi_dot * state.phi_dot;
        let potential = 0.5 * p.stiffness * state.x * state.x
            - p.bob_mass * p.gravity * p.cord_length * state.phi.cos();
        kinetic + potential
    }
}

impl DynamicModel for PulleySystem {
    type State = PulleyState;

    fn rhs(&self, _t: f64, s: &PulleyState) -> SimResult<PulleyState> {
        let p = &self.params;

        let a = self.coefficients();
        let det = a.determinant();
        let scale = 1.0f64.max(a[(0, 0)].abs()).max(a[(1, 1)].abs());
        if det.abs() < DET_EPS * scale {
            return Err(SimError::DegenerateSystem { det });
        }

        // Spring term written as c*x + m*g: the static deflection m*g/c is
        // folded in, so zero stiffness stays well defined.
        let b = Vector2::new(
            p.bob_mass * p.gravity * s.phi.cos() - p.stiffness * s.x - p.bob_mass * p.gravity
                + p.bob_mass * p.cord_length * s.phi_dot * s.phi_dot,
            -p.gravity * s.phi.sin() - s.phi_dot * (2.0 * s.x_dot - p.pulley_radius * s.phi_dot),
        );

        // Cramer's rule on the 2x2 system.
        let x_ddot = (b[0] * a[(1, 1)] - b[1] * a[(0, 1)]) / det;
        let phi_ddot = (a[(0, 0)] * b[1] - a[(1, 0)] * b[0]) / det;

        Ok(PulleyState {
            x: s.x_dot,
            phi: s.phi_dot,
            x_dot: x_ddot,
            phi_dot: phi_ddot,
        })
    }

    fn add(&self, a: &PulleyState, b: &PulleyState) -> PulleyState {
        PulleyState {
            x: a.x + b.x,
            phi: a.phi + b.phi,
            x_dot: a.x_dot + b.x_dot,
            phi_dot: a.phi_dot + b.phi_dot,
        }
    }

    fn scale(&self, a: &PulleyState, scale: f64) -> PulleyState {
        PulleyState {
            x: a.x * scale,
            phi: a.phi * scale,
            x_dot: a.x_dot * scale,
            phi_dot: a.phi_dot * scale,
        }
    }

    fn norm(&self, a: &PulleyState) -> f64 {
        a.x
            .abs()
            .max(a.phi.abs())
            .max(a.x_dot.abs())
            .max(a.phi_dot.abs())
    }
}
