//! Post-processing of solved trajectories.
//!
//! Provides:
//! - Exact re-derived accelerations and reaction forces (DerivedTrajectory)
//! - Curvature radius of the bob's Cartesian path
//! - Cartesian joint sampling for external renderers

pub mod derived;
pub mod path;
pub mod sampler;

// Re-exports for public API
pub use derived::{DerivedTrajectory, derive};
pub use path::curvature_radius;
pub use sampler::{CartesianFrame, RigGeometry};
