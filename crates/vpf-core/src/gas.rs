//! Ideal-gas constants for dry air.
//!
//! These are the calorically perfect values used by every closed-form
//! relation in the workspace (ISA, isentropic stagnation, speed of sound).

use crate::numeric::Real;

/// Ratio of specific heats for air [-].
pub const GAMMA_AIR: Real = 1.4;

/// Specific gas constant for air [J/(kg·K)].
pub const R_AIR: Real = 287.05;

/// Speed of sound of an ideal gas at static temperature `t_k` [m/s].
#[inline]
pub fn speed_of_sound_mps(t_k: Real) -> Real {
    (GAMMA_AIR * R_AIR * t_k).sqrt()
}
