//! First-order blade loading and cycle estimators.

use crate::error::{AeroError, AeroResult};
use std::f64::consts::TAU;
use vpf_core::Real;
use vpf_core::units::{Length, MassRate, Velocity, m};

/// Floor for `U·Vx` so a stalled or stationary section does not divide by zero.
const MIN_VELOCITY_PRODUCT: Real = 1e-9;

/// Wall-resolved target used when no other y+ is asked for.
pub const DEFAULT_TARGET_Y_PLUS: Real = 1.0;

/// First-cell height scale per unit radius and unit y+.
const FIRST_CELL_SCALE: Real = 1e-4;

/// Non-dimensional blade loading `2π·Γ / (U·Vx)`.
///
/// `circulation_m2ps` is the bound circulation Γ [m²/s].
pub fn blade_loading_coefficient(
    circulation_m2ps: Real,
    blade_speed: Velocity,
    axial_velocity: Velocity,
) -> Real {
    let product = (blade_speed.value * axial_velocity.value).max(MIN_VELOCITY_PRODUCT);
    TAU * circulation_m2ps / product
}

/// Incidence after applying a pitch offset to the design incidence [deg].
pub fn incidence_delta_deg(design_incidence_deg: Real, pitch_offset_deg: Real) -> Real {
    design_incidence_deg + pitch_offset_deg
}

/// Crude specific-thrust estimate `(Vj - V0) / ṁ`.
pub fn estimate_specific_thrust(
    jet_velocity: Velocity,
    flight_velocity: Velocity,
    mass_flow: MassRate,
) -> AeroResult<Real> {
    if !(mass_flow.value > 0.0) {
        return Err(AeroError::InvalidArg {
            what: "mass flow must be positive",
        });
    }
    Ok((jet_velocity.value - flight_velocity.value) / mass_flow.value)
}

/// Rough first-cell height for a blade-row mesh, `radius · y+ · 1e-4`.
pub fn mesh_resolution_hint(radius: Length, target_y_plus: Real) -> AeroResult<Length> {
    if !(radius.value > 0.0) {
        return Err(AeroError::InvalidArg {
            what: "radius must be positive",
        });
    }
    Ok(m(radius.value * target_y_plus * FIRST_CELL_SCALE))
}
