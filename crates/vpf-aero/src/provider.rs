//! Polar provider capability.
//!
//! Generating polars usually means driving an external panel code. That
//! process boundary lives behind [`PolarProvider`], so nothing in the domain
//! or study layers spawns processes. [`TablePolarProvider`] serves polars
//! that were tabulated ahead of time.

use crate::error::{AeroError, AeroResult};
use crate::polar::AirfoilPolar;
use vpf_core::Real;
use vpf_core::units::Length;
use vpf_domain::OperatingCondition;

/// What a caller asks a polar provider for.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarRequest {
    pub airfoil: String,
    pub reynolds: Real,
    pub mach: Real,
    pub alpha_start_deg: Real,
    pub alpha_end_deg: Real,
    pub alpha_step_deg: Real,
    pub ncrit: Real,
    pub max_iter: u32,
}

impl PolarRequest {
    pub fn new(airfoil: impl Into<String>, reynolds: Real, mach: Real) -> Self {
        Self {
            airfoil: airfoil.into(),
            reynolds,
            mach,
            alpha_start_deg: -10.0,
            alpha_end_deg: 15.0,
            alpha_step_deg: 0.5,
            ncrit: 9.0,
            max_iter: 100,
        }
    }

    /// Request matching the Reynolds and Mach numbers of `condition`.
    pub fn for_condition(
        airfoil: impl Into<String>,
        condition: &OperatingCondition,
        chord: Length,
    ) -> AeroResult<Self> {
        condition.validate()?;
        let reynolds = condition.reynolds_number(chord)?;
        Ok(Self::new(airfoil, reynolds, condition.mach_number()))
    }

    pub fn with_alpha_range(self, start_deg: Real, end_deg: Real, step_deg: Real) -> Self {
        Self {
            alpha_start_deg: start_deg,
            alpha_end_deg: end_deg,
            alpha_step_deg: step_deg,
            ..self
        }
    }

    pub fn validate(&self) -> AeroResult<()> {
        if !(self.reynolds > 0.0) {
            return Err(AeroError::InvalidArg {
                what: "Reynolds must be positive",
            });
        }
        if !(self.mach >= 0.0) {
            return Err(AeroError::InvalidArg {
                what: "Mach must be non-negative",
            });
        }
        if !(self.alpha_step_deg > 0.0) {
            return Err(AeroError::InvalidArg {
                what: "alpha step must be positive",
            });
        }
        if !(self.alpha_end_deg > self.alpha_start_deg) {
            return Err(AeroError::InvalidArg {
                what: "alpha end must be greater than alpha start",
            });
        }
        Ok(())
    }
}

/// Source of airfoil polars.
///
/// Implementations must be thread-safe (Send + Sync) so sweeps can query them
/// in parallel. A provider backed by an external tool reports a missing
/// executable as [`AeroError::ToolUnavailable`] and a failed run as
/// [`AeroError::GenerationFailed`].
pub trait PolarProvider: Send + Sync {
    /// Provider name (for logging).
    fn name(&self) -> &str;

    /// Produce a validated polar for `request`.
    fn generate(&self, request: &PolarRequest) -> AeroResult<AirfoilPolar>;
}

/// Provider serving pre-tabulated polars.
///
/// Returns the stored polar for the requested airfoil whose Reynolds and Mach
/// numbers are closest to the request.
#[derive(Debug, Clone, Default)]
pub struct TablePolarProvider {
    polars: Vec<AirfoilPolar>,
}

impl TablePolarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, polar: AirfoilPolar) {
        self.polars.push(polar);
    }

    pub fn len(&self) -> usize {
        self.polars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polars.is_empty()
    }

    // log-distance in Re, linear in Mach (0.1 in Mach ~ factor e in Re)
    fn distance(polar: &AirfoilPolar, request: &PolarRequest) -> Real {
        let meta = polar.meta();
        let d_re = (meta.reynolds / request.reynolds).ln();
        let d_mach = (meta.mach - request.mach) / 0.1;
        d_re * d_re + d_mach * d_mach
    }
}

impl FromIterator<AirfoilPolar> for TablePolarProvider {
    fn from_iter<I: IntoIterator<Item = AirfoilPolar>>(iter: I) -> Self {
        Self {
            polars: iter.into_iter().collect(),
        }
    }
}

impl PolarProvider for TablePolarProvider {
    fn name(&self) -> &str {
        "table"
    }

    fn generate(&self, request: &PolarRequest) -> AeroResult<AirfoilPolar> {
        request.validate()?;

        self.polars
            .iter()
            .filter(|p| p.meta().airfoil_id.eq_ignore_ascii_case(&request.airfoil))
            .min_by(|a, b| {
                Self::distance(a, request).total_cmp(&Self::distance(b, request))
            })
            .cloned()
            .ok_or_else(|| AeroError::NoMatchingPolar {
                airfoil: request.airfoil.clone(),
            })
    }
}
