//! Domain validation errors.

use thiserror::Error;
use vpf_core::CoreError;

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised while constructing or combining domain value objects.
///
/// Every variant describes an input the caller has to fix; none of them are
/// transient, so there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Altitude outside the validity range of the atmosphere model.
    #[error("Altitude {altitude_m} m outside model range [{min_m}, {max_m}] m")]
    AltitudeOutOfRange {
        altitude_m: f64,
        min_m: f64,
        max_m: f64,
    },

    /// Non-physical values (negative velocity, non-positive pressure, etc.).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// NaN or infinite input.
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Blade pitch outside the actuator authority window.
    #[error("Pitch angle {pitch_deg:.3} deg outside authority window ±{limit_deg} deg")]
    PitchOutOfAuthority { pitch_deg: f64, limit_deg: f64 },

    /// Radial station outside (0, 1].
    #[error("r/R = {r_over_r} outside (0, 1]")]
    RadialPositionOutOfRange { r_over_r: f64 },

    /// Pitch sweep with too few points to define a range.
    #[error("Pitch sweep needs at least 2 points, got {n_points}")]
    SweepTooShort { n_points: usize },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<CoreError> for DomainError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => DomainError::NonFinite { what, value },
            CoreError::InvalidArg { what } => DomainError::InvalidArg { what },
        }
    }
}
