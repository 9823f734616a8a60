//! Compressible flow state.
//!
//! A flow condition described by its velocity, direction and static
//! properties. Independent of any blade: the same state can be combined with
//! many blade settings to study incidence.

use crate::atmosphere::AtmosphereState;
use crate::error::{DomainError, DomainResult};
use crate::reference_frame::ReferenceFrame;
use vpf_core::gas::{GAMMA_AIR, speed_of_sound_mps};
use vpf_core::units::{Angle, Density, DynVisc, Length, Pressure, Temperature, Velocity};
use vpf_core::units::{k, pa};
use vpf_core::{Real, ensure_finite};

/// Flow condition at a blade section inlet.
///
/// Derived quantities use the isentropic stagnation relations, which hold for
/// subsonic and moderately transonic flow without shocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    velocity: Velocity,
    flow_angle: Angle,
    static_pressure: Pressure,
    static_temperature: Temperature,
    density: Density,
    frame: ReferenceFrame,
}

impl FlowState {
    /// Assemble a flow state without checking it.
    pub fn new(
        velocity: Velocity,
        flow_angle: Angle,
        static_pressure: Pressure,
        static_temperature: Temperature,
        density: Density,
    ) -> Self {
        Self {
            velocity,
            flow_angle,
            static_pressure,
            static_temperature,
            density,
            frame: ReferenceFrame::default(),
        }
    }

    /// Assemble and validate a flow state.
    pub fn try_new(
        velocity: Velocity,
        flow_angle: Angle,
        static_pressure: Pressure,
        static_temperature: Temperature,
        density: Density,
    ) -> DomainResult<Self> {
        let state = Self::new(
            velocity,
            flow_angle,
            static_pressure,
            static_temperature,
            density,
        );
        state.validate()?;
        Ok(state)
    }

    /// Flow state carrying the static properties of `atmosphere`.
    pub fn from_atmosphere(
        atmosphere: &AtmosphereState,
        velocity: Velocity,
        flow_angle: Angle,
    ) -> Self {
        Self::new(
            velocity,
            flow_angle,
            atmosphere.pressure(),
            atmosphere.temperature(),
            atmosphere.density(),
        )
    }

    /// Same state, tagged with another reference frame.
    pub fn with_frame(self, frame: ReferenceFrame) -> Self {
        Self { frame, ..self }
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn flow_angle(&self) -> Angle {
        self.flow_angle
    }

    pub fn static_pressure(&self) -> Pressure {
        self.static_pressure
    }

    pub fn static_temperature(&self) -> Temperature {
        self.static_temperature
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn frame(&self) -> ReferenceFrame {
        self.frame
    }

    pub fn validate(&self) -> DomainResult<()> {
        let v = ensure_finite(self.velocity.value, "velocity")?;
        ensure_finite(self.flow_angle.value, "flow angle")?;
        let p = ensure_finite(self.static_pressure.value, "static pressure")?;
        let t = ensure_finite(self.static_temperature.value, "static temperature")?;
        let rho = ensure_finite(self.density.value, "density")?;

        if v < 0.0 {
            return Err(DomainError::NonPhysical {
                what: "velocity",
                value: v,
            });
        }
        if p <= 0.0 {
            return Err(DomainError::NonPhysical {
                what: "static pressure",
                value: p,
            });
        }
        if t <= 0.0 {
            return Err(DomainError::NonPhysical {
                what: "static temperature",
                value: t,
            });
        }
        if rho <= 0.0 {
            return Err(DomainError::NonPhysical {
                what: "density",
                value: rho,
            });
        }
        Ok(())
    }

    /// Mach number `V / sqrt(γ R T)`.
    pub fn mach_number(&self) -> Real {
        self.velocity.value / speed_of_sound_mps(self.static_temperature.value)
    }

    // 1 + (γ-1)/2 M²
    fn stagnation_ratio(&self) -> Real {
        let mach = self.mach_number();
        1.0 + 0.5 * (GAMMA_AIR - 1.0) * mach * mach
    }

    /// Isentropic stagnation temperature.
    pub fn total_temperature(&self) -> Temperature {
        k(self.static_temperature.value * self.stagnation_ratio())
    }

    /// Isentropic stagnation pressure.
    pub fn total_pressure(&self) -> Pressure {
        let exponent = GAMMA_AIR / (GAMMA_AIR - 1.0);
        pa(self.static_pressure.value * self.stagnation_ratio().powf(exponent))
    }

    /// Reynolds number `ρ V L / μ` for a characteristic length.
    pub fn reynolds_number(
        &self,
        characteristic_length: Length,
        dynamic_viscosity: DynVisc,
    ) -> DomainResult<Real> {
        let length = ensure_finite(characteristic_length.value, "characteristic length")?;
        let mu = ensure_finite(dynamic_viscosity.value, "dynamic viscosity")?;
        if length <= 0.0 {
            return Err(DomainError::InvalidArg {
                what: "characteristic length must be positive",
            });
        }
        if mu <= 0.0 {
            return Err(DomainError::InvalidArg {
                what: "dynamic viscosity must be positive",
            });
        }
        Ok(self.density.value * self.velocity.value * length / mu)
    }
}
