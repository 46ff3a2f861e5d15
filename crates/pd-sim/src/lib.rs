//! Transient simulation of the pulley-spring-pendulum rig.
//!
//! Provides:
//! - Equations of motion for the coupled translation/rotation system
//! - DynamicModel trait for pluggable dynamic systems
//! - Fixed-step RK4 and adaptive RKF45 integrators
//! - Grid-aligned trajectory runner

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod system;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{Integrator, Rk4, Rkf45};
pub use model::DynamicModel;
pub use sim::{IntegrateOptions, IntegratorType, Trajectory, integrate};
pub use system::{PulleyParams, PulleyState, PulleySystem};
