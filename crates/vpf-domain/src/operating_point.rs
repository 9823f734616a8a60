//! Named operating points (cruise, takeoff, climb, ...).

use std::fmt;
use vpf_core::Real;
use vpf_core::units::Length;

/// Descriptive tag for a flight condition.
///
/// Carries no physics and is never required for physical validity; it only
/// labels [`OperatingCondition`](crate::OperatingCondition)s in reports.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingPoint {
    name: String,
    altitude: Length,
    mach: Real,
    description: String,
}

impl OperatingPoint {
    pub fn new(name: impl Into<String>, altitude: Length, mach: Real) -> Self {
        Self {
            name: name.into(),
            altitude,
            mach,
            description: String::new(),
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Design altitude.
    pub fn altitude(&self) -> Length {
        self.altitude
    }

    /// Design flight Mach number.
    pub fn mach(&self) -> Real {
        self.mach
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for OperatingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (h={:.0} m, M={:.2})",
            self.name, self.altitude.value, self.mach
        )?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}
