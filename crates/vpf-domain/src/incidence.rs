//! Blade incidence.
//!
//! Sign convention:
//!
//! ```text
//! incidence = flow_angle - chord_angle
//!           = flow_angle - (stagger_angle + pitch_angle)
//! ```
//!
//! Positive incidence means the flow meets the chord line from the positive
//! angular side. The result is always wrapped to (-π, π] so that, for
//! example, a raw difference of 359° reads as -1°.

use crate::blade_kinematics::BladeKinematics;
use crate::error::DomainResult;
use crate::flow_state::FlowState;
use std::f64::consts::{PI, TAU};
use vpf_core::Real;
use vpf_core::units::{Angle, rad, to_deg};

/// Wrap an angle in radians to (-π, π].
///
/// Uses the Euclidean (non-negative) remainder so negative inputs wrap the
/// same way as positive ones. The lower edge -π is folded onto +π.
pub fn wrap_to_pi(angle_rad: Real) -> Real {
    let wrapped = (angle_rad + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Incidence of `flow` on `blade`, wrapped to (-π, π].
///
/// Both inputs are validated first since they are usually built
/// independently; the first failing check is returned.
pub fn compute_incidence(flow: &FlowState, blade: &BladeKinematics) -> DomainResult<Angle> {
    flow.validate()?;
    blade.validate()?;

    let raw = flow.flow_angle().value - blade.chord_angle().value;
    Ok(rad(wrap_to_pi(raw)))
}

/// [`compute_incidence`] in degrees, for reports and logs.
pub fn incidence_deg(flow: &FlowState, blade: &BladeKinematics) -> DomainResult<Real> {
    compute_incidence(flow, blade).map(to_deg)
}

/// Pitch that brings incidence to zero for a given flow and stagger.
///
/// Solves `flow_angle - (stagger + pitch) = 0`. The result is wrapped but not
/// checked against the authority window; see
/// [`within_pitch_authority`](crate::blade_kinematics::within_pitch_authority).
pub fn pitch_for_zero_incidence(flow: &FlowState, stagger_angle: Angle) -> Angle {
    rad(wrap_to_pi(flow.flow_angle().value - stagger_angle.value))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn wrapped_angle_is_in_half_open_interval(raw in -1.0e4_f64..1.0e4_f64) {
            let w = wrap_to_pi(raw);
            prop_assert!(w > -PI && w <= PI);
        }

        #[test]
        fn wrapped_angle_is_congruent_to_input(raw in -1.0e4_f64..1.0e4_f64) {
            let w = wrap_to_pi(raw);
            let turns = (w - raw) / TAU;
            prop_assert!((turns - turns.round()).abs() < 1e-9);
        }

        #[test]
        fn wrap_is_identity_inside_interval(raw in -3.0_f64..3.0_f64) {
            prop_assert!((wrap_to_pi(raw) - raw).abs() < 1e-12);
        }
    }
}
