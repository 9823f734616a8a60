//! International Standard Atmosphere, troposphere segment.
//!
//! Maps an altitude to a full thermodynamic state. The model makes no claim
//! above the tropopause, so altitudes outside [0, 11 000] m are rejected
//! instead of extrapolated.

use crate::error::{DomainError, DomainResult};
use vpf_core::gas::R_AIR;
use vpf_core::units::constants::G0_MPS2;
use vpf_core::units::{Density, DynVisc, Length, Pressure, Temperature, Velocity};
use vpf_core::units::{k, kgpm3, mps, pa, pas};
use vpf_core::{Real, Tolerances, ensure_finite, nearly_equal};

/// Upper validity limit of the implemented ISA segment [m].
pub const TROPOSPHERE_LIMIT_M: Real = 11_000.0;

/// ISA sea-level temperature [K].
pub const ISA_T0_K: Real = 288.15;

/// ISA sea-level pressure [Pa].
pub const ISA_P0_PA: Real = 101_325.0;

/// Tropospheric temperature lapse rate [K/m].
pub const ISA_LAPSE_RATE_K_PER_M: Real = -0.0065;

// Rounded table values (e.g. rho = 1.225 at sea level) must still pass
const IDEAL_GAS_REL_TOL: Real = 1e-3;

// Sutherland's law for air
const SUTHERLAND_T_REF_K: Real = 273.15;
const SUTHERLAND_MU_REF_PA_S: Real = 1.716e-5;
const SUTHERLAND_S_K: Real = 110.4;

/// Thermodynamic state of the atmosphere at one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereState {
    altitude: Length,
    temperature: Temperature,
    pressure: Pressure,
    density: Density,
}

impl AtmosphereState {
    /// Assemble a state without checking it. Call [`validate`](Self::validate)
    /// before trusting derived properties.
    pub fn new(
        altitude: Length,
        temperature: Temperature,
        pressure: Pressure,
        density: Density,
    ) -> Self {
        Self {
            altitude,
            temperature,
            pressure,
            density,
        }
    }

    pub fn altitude(&self) -> Length {
        self.altitude
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Check positivity, altitude range and ideal-gas consistency.
    pub fn validate(&self) -> DomainResult<()> {
        let h = ensure_finite(self.altitude.value, "altitude")?;
        let t = ensure_finite(self.temperature.value, "temperature")?;
        let p = ensure_finite(self.pressure.value, "pressure")?;
        let rho = ensure_finite(self.density.value, "density")?;

        check_altitude(h)?;
        if t <= 0.0 {
            return Err(DomainError::NonPhysical {
                what: "temperature",
                value: t,
            });
        }
        if p <= 0.0 {
            return Err(DomainError::NonPhysical {
                what: "pressure",
                value: p,
            });
        }
        if rho <= 0.0 {
            return Err(DomainError::NonPhysical {
                what: "density",
                value: rho,
            });
        }

        let rho_ideal = p / (R_AIR * t);
        if !nearly_equal(rho, rho_ideal, Tolerances::relative(IDEAL_GAS_REL_TOL)) {
            return Err(DomainError::NonPhysical {
                what: "density inconsistent with p = rho R T",
                value: rho,
            });
        }

        Ok(())
    }

    /// Speed of sound `sqrt(γ R T)`.
    pub fn speed_of_sound(&self) -> Velocity {
        mps(vpf_core::gas::speed_of_sound_mps(self.temperature.value))
    }

    /// Dynamic viscosity from Sutherland's law.
    pub fn dynamic_viscosity(&self) -> DynVisc {
        let t = self.temperature.value;
        let mu = SUTHERLAND_MU_REF_PA_S
            * (t / SUTHERLAND_T_REF_K).powf(1.5)
            * ((SUTHERLAND_T_REF_K + SUTHERLAND_S_K) / (t + SUTHERLAND_S_K));
        pas(mu)
    }
}

fn check_altitude(altitude_m: Real) -> DomainResult<()> {
    if (0.0..=TROPOSPHERE_LIMIT_M).contains(&altitude_m) {
        Ok(())
    } else {
        Err(DomainError::AltitudeOutOfRange {
            altitude_m,
            min_m: 0.0,
            max_m: TROPOSPHERE_LIMIT_M,
        })
    }
}

/// Compute the ISA state at `altitude` (troposphere only).
pub fn isa_atmosphere(altitude: Length) -> DomainResult<AtmosphereState> {
    let h = ensure_finite(altitude.value, "altitude")?;
    check_altitude(h)?;

    let t = ISA_T0_K + ISA_LAPSE_RATE_K_PER_M * h;
    let exponent = -G0_MPS2 / (ISA_LAPSE_RATE_K_PER_M * R_AIR);
    let p = ISA_P0_PA * (t / ISA_T0_K).powf(exponent);
    let rho = p / (R_AIR * t);

    let state = AtmosphereState::new(altitude, k(t), pa(p), kgpm3(rho));
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpf_core::units::m;

    #[test]
    fn sea_level_matches_reference_values() {
        let atm = isa_atmosphere(m(0.0)).unwrap();
        assert_eq!(atm.temperature().value, 288.15);
        assert_eq!(atm.pressure().value, 101_325.0);
        assert!((atm.density().value - 1.225).abs() / 1.225 < 1e-3);
    }

    #[test]
    fn tropopause_values() {
        let atm = isa_atmosphere(m(TROPOSPHERE_LIMIT_M)).unwrap();
        assert!((atm.temperature().value - 216.65).abs() < 1e-9);
        assert!((atm.pressure().value - 22_632.0).abs() < 1.0);
        assert!((atm.density().value - 0.3639).abs() < 1e-3);
    }

    #[test]
    fn rejects_altitudes_outside_troposphere() {
        for h in [-1.0, 11_001.0] {
            let err = isa_atmosphere(m(h)).unwrap_err();
            assert!(matches!(err, DomainError::AltitudeOutOfRange { .. }));
        }
    }

    #[test]
    fn accepts_range_boundaries() {
        assert!(isa_atmosphere(m(0.0)).is_ok());
        assert!(isa_atmosphere(m(11_000.0)).is_ok());
    }

    #[test]
    fn rejects_nan_altitude() {
        let err = isa_atmosphere(m(f64::NAN)).unwrap_err();
        assert!(matches!(err, DomainError::NonFinite { .. }));
    }

    #[test]
    fn speed_of_sound_and_viscosity_at_sea_level() {
        let atm = isa_atmosphere(m(0.0)).unwrap();
        assert!((atm.speed_of_sound().value - 340.29).abs() < 0.01);
        assert!((atm.dynamic_viscosity().value - 1.789e-5).abs() < 1e-8);
    }

    #[test]
    fn viscosity_equals_reference_at_reference_temperature() {
        let atm = AtmosphereState::new(
            m(0.0),
            k(SUTHERLAND_T_REF_K),
            pa(101_325.0),
            kgpm3(101_325.0 / (R_AIR * SUTHERLAND_T_REF_K)),
        );
        assert!((atm.dynamic_viscosity().value - SUTHERLAND_MU_REF_PA_S).abs() < 1e-15);
    }

    #[test]
    fn manual_state_with_negative_pressure_fails() {
        let atm = AtmosphereState::new(m(0.0), k(288.15), pa(-1.0), kgpm3(1.225));
        let err = atm.validate().unwrap_err();
        assert!(matches!(err, DomainError::NonPhysical { what: "pressure", .. }));
    }

    #[test]
    fn rounded_standard_sea_level_state_validates() {
        let atm = AtmosphereState::new(m(0.0), k(288.15), pa(101_325.0), kgpm3(1.225));
        atm.validate().unwrap();
    }

    #[test]
    fn manual_state_inconsistent_with_ideal_gas_fails() {
        let atm = AtmosphereState::new(m(0.0), k(288.15), pa(101_325.0), kgpm3(2.0));
        assert!(atm.validate().is_err());
    }
}
