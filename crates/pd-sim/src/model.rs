//! DynamicModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for systems evolving under `dx/dt = f(t, x)`.
///
/// A DynamicModel must implement:
/// - State type (Clone, for trajectory snapshots)
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - State arithmetic for integration: add states, scale by scalar, norm
pub trait DynamicModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Must be a pure function of (t, x): the runner and the post-processor
    /// both re-invoke it on stored samples and rely on identical results.
    fn rhs(&self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Max-abs norm of a state, used by adaptive error control.
    fn norm(&self, a: &Self::State) -> f64;
}
