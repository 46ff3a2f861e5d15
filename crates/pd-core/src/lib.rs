//! pd-core: stable foundation for pulleydyn.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - grid (the time grid shared by every pipeline stage)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use grid::TimeGrid;
pub use numeric::*;
