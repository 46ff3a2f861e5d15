//! Error types for configuration and integration.

use thiserror::Error;

/// Errors encountered while configuring or integrating the system.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: &'static str },

    #[error("Degenerate system: acceleration coefficient determinant {det:e} is numerically singular")]
    DegenerateSystem { det: f64 },

    #[error("Integration failed at t = {t_reached}: {what}")]
    IntegrationFailure { t_reached: f64, what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pd_core::CoreError> for SimError {
    fn from(e: pd_core::CoreError) -> Self {
        match e {
            pd_core::CoreError::NonFinite { what, .. } => SimError::InvalidConfiguration { what },
            pd_core::CoreError::InvalidArg { what } => SimError::InvalidConfiguration { what },
        }
    }
}
