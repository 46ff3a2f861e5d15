//! pd-results: flat result rows for external consumers.
//!
//! The renderer boundary consumes read-only arrays keyed by time; these types
//! are the serializable form of one run's trajectories. There is no run cache
//! and nothing here persists state.

pub mod types;

pub use types::*;
