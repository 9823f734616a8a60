//! Aerodynamic data errors.

use thiserror::Error;
use vpf_core::CoreError;
use vpf_domain::DomainError;

/// Result type for aerodynamic operations.
pub type AeroResult<T> = Result<T, AeroError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AeroError {
    /// Polar arrays violate a consistency rule.
    #[error("Invalid polar: {what}")]
    InvalidPolar { what: &'static str },

    /// Strict lookup outside the tabulated alpha range.
    #[error("alpha={alpha_deg:.3} deg outside polar range [{min_deg:.3}, {max_deg:.3}] deg")]
    AlphaOutOfRange {
        alpha_deg: f64,
        min_deg: f64,
        max_deg: f64,
    },

    /// Moment coefficient requested from a polar without CM data.
    #[error("Polar for {airfoil} has no CM data")]
    MissingMoment { airfoil: String },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// NaN or infinite input.
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// No stored polar for the requested airfoil.
    #[error("No polar available for airfoil {airfoil}")]
    NoMatchingPolar { airfoil: String },

    /// The external polar tool could not be reached.
    #[error("Polar tool {tool} unavailable: {message}")]
    ToolUnavailable { tool: String, message: String },

    /// The external polar tool ran but produced no usable polar.
    #[error("Polar generation failed: {message}")]
    GenerationFailed { message: String },

    /// Domain-level validation failure (e.g. while deriving Re/Mach).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<CoreError> for AeroError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => AeroError::NonFinite { what, value },
            CoreError::InvalidArg { what } => AeroError::InvalidArg { what },
        }
    }
}
