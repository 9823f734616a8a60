//! vpf-study: parametric studies over the VPF domain model.
//!
//! Provides:
//! - `StudyConfig` YAML format with defaults for every field
//! - Pitch-sweep incidence study (parallel over sweep points)
//! - Named operating point evaluation, with optional polar lookups

pub mod config;
pub mod error;
pub mod points;
pub mod sweep;

pub use config::{
    AirfoilDef, OperatingPointDef, PolarTableDef, StudyConfig, load_yaml, save_yaml,
};
pub use error::{StudyError, StudyResult};
pub use points::{PointEvaluation, SectionCoefficients, evaluate_operating_points};
pub use sweep::{PitchSweepReport, SweepSample, build_flow_state_from_isa, run_pitch_sweep_study};
