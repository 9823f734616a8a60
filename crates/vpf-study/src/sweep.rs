//! Pitch-sweep incidence study.
//!
//! Evaluates, at a purely kinematic level, how a pitch sweep shifts blade
//! incidence under a nominal and an off-design inlet flow angle, and whether
//! the pitch that restores zero incidence off-design is inside the actuator
//! authority.

use crate::config::StudyConfig;
use crate::error::StudyResult;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace, warn};
use vpf_core::Real;
use vpf_core::units::{Angle, Length, deg, mps, to_deg};
use vpf_domain::{
    BladeKinematics, DomainError, DomainResult, FlowState, PitchSweep, compute_incidence,
    isa_atmosphere, pitch_for_zero_incidence, within_pitch_authority,
};

/// Flow state at `altitude` in the ISA, moving at `mach` along `flow_angle`.
///
/// Velocity is `mach` times the local speed of sound; the static properties
/// are taken from the atmosphere.
pub fn build_flow_state_from_isa(
    altitude: Length,
    mach: Real,
    flow_angle: Angle,
) -> DomainResult<FlowState> {
    let mach = vpf_core::ensure_finite(mach, "mach")?;
    if mach < 0.0 {
        return Err(DomainError::NonPhysical {
            what: "mach",
            value: mach,
        });
    }

    let atmosphere = isa_atmosphere(altitude)?;
    let velocity = mps(mach * atmosphere.speed_of_sound().value);
    let flow = FlowState::from_atmosphere(&atmosphere, velocity, flow_angle);
    flow.validate()?;
    Ok(flow)
}

/// One pitch setting of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSample {
    pub pitch_deg: Real,
    pub chord_angle_deg: Real,
    pub incidence_nominal_deg: Real,
    pub incidence_off_design_deg: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchSweepReport {
    pub altitude_m: Real,
    pub mach: Real,
    pub nominal_flow_angle_deg: Real,
    pub off_design_flow_angle_deg: Real,
    pub stagger_deg: Real,
    pub r_over_r: Real,
    /// Ordered by ascending pitch.
    pub samples: Vec<SweepSample>,
    /// Pitch that brings off-design incidence back to zero.
    pub pitch_to_zero_deg: Real,
    /// Whether `pitch_to_zero_deg` is within the pitch authority.
    pub feasible: bool,
}

impl PitchSweepReport {
    /// Sample with the smallest off-design incidence magnitude.
    pub fn best_off_design_sample(&self) -> Option<&SweepSample> {
        self.samples.iter().min_by(|a, b| {
            a.incidence_off_design_deg
                .abs()
                .total_cmp(&b.incidence_off_design_deg.abs())
        })
    }
}

pub fn run_pitch_sweep_study(config: &StudyConfig) -> StudyResult<PitchSweepReport> {
    config.validate()?;

    let altitude = config.altitude();
    let nominal =
        build_flow_state_from_isa(altitude, config.mach, deg(config.nominal_flow_angle_deg))?;
    let off_design =
        build_flow_state_from_isa(altitude, config.mach, deg(config.off_design_flow_angle_deg))?;
    let stagger = config.stagger();

    info!(
        altitude_m = config.altitude_m,
        mach = config.mach,
        stagger_deg = to_deg(stagger),
        n_points = config.sweep_points,
        "Running pitch sweep"
    );

    let sweep = PitchSweep::new(stagger, config.r_over_r)
        .with_bounds(deg(config.pitch_min_deg), deg(config.pitch_max_deg))
        .with_points(config.sweep_points)
        .generate()?;

    let samples = sweep
        .par_iter()
        .map(|blade| sample(&nominal, &off_design, blade))
        .collect::<DomainResult<Vec<_>>>()?;

    let pitch_to_zero = pitch_for_zero_incidence(&off_design, stagger);
    let feasible = within_pitch_authority(pitch_to_zero);
    let pitch_to_zero_deg = to_deg(pitch_to_zero);
    if feasible {
        debug!(pitch_to_zero_deg, "Off-design incidence recoverable");
    } else {
        warn!(pitch_to_zero_deg, "Zero incidence needs pitch beyond authority");
    }

    info!(samples = samples.len(), feasible, "Pitch sweep complete");

    Ok(PitchSweepReport {
        altitude_m: config.altitude_m,
        mach: config.mach,
        nominal_flow_angle_deg: config.nominal_flow_angle_deg,
        off_design_flow_angle_deg: config.off_design_flow_angle_deg,
        stagger_deg: to_deg(stagger),
        r_over_r: config.r_over_r,
        samples,
        pitch_to_zero_deg,
        feasible,
    })
}

fn sample(
    nominal: &FlowState,
    off_design: &FlowState,
    blade: &BladeKinematics,
) -> DomainResult<SweepSample> {
    let incidence_nominal = compute_incidence(nominal, blade)?;
    let incidence_off_design = compute_incidence(off_design, blade)?;
    trace!(pitch_deg = blade.pitch_angle_deg(), "Sweep point evaluated");

    Ok(SweepSample {
        pitch_deg: blade.pitch_angle_deg(),
        chord_angle_deg: blade.chord_angle_deg(),
        incidence_nominal_deg: to_deg(incidence_nominal),
        incidence_off_design_deg: to_deg(incidence_off_design),
    })
}
