//! vpf-domain: physical state objects for the VPF fan study.
//!
//! Provides:
//! - ISA troposphere model (`isa_atmosphere`, `AtmosphereState`)
//! - Compressible flow state with Mach, stagnation and Reynolds views
//! - Blade section kinematics and pitch sweeps
//! - Incidence with a fixed sign convention and (-π, π] wrapping
//! - Operating conditions aggregating all of the above
//!
//! # Architecture
//!
//! Data flows one way: atmosphere → flow state → (flow state, blade) →
//! incidence → operating condition. Every type is an immutable value object;
//! "changing" one means building a new one. Constructors named `new` do not
//! validate, `try_new` and the factories do, and every type exposes
//! `validate()` for the caller to run before trusting derived properties.
//!
//! # Example
//!
//! ```
//! use vpf_core::units::{deg, m, mps};
//! use vpf_domain::{BladeKinematics, FlowState, compute_incidence, isa_atmosphere};
//!
//! let atm = isa_atmosphere(m(11_000.0)).unwrap();
//! let velocity = mps(0.78 * atm.speed_of_sound().value);
//! let flow = FlowState::from_atmosphere(&atm, velocity, deg(35.0));
//! let blade = BladeKinematics::from_degrees(5.0, 30.0, 0.9).unwrap();
//!
//! let incidence = compute_incidence(&flow, &blade).unwrap();
//! assert!(incidence.value.abs() < 1e-9);
//! ```

pub mod atmosphere;
pub mod blade_kinematics;
pub mod error;
pub mod flow_state;
pub mod incidence;
pub mod operating_condition;
pub mod operating_point;
pub mod reference_frame;

// Re-exports for ergonomics
pub use atmosphere::{AtmosphereState, TROPOSPHERE_LIMIT_M, isa_atmosphere};
pub use blade_kinematics::{
    BladeKinematics, DEFAULT_SWEEP_POINTS, PITCH_AUTHORITY_DEG, PitchSweep, max_pitch, min_pitch,
    within_pitch_authority,
};
pub use error::{DomainError, DomainResult};
pub use flow_state::FlowState;
pub use incidence::{compute_incidence, incidence_deg, pitch_for_zero_incidence, wrap_to_pi};
pub use operating_condition::OperatingCondition;
pub use operating_point::OperatingPoint;
pub use reference_frame::ReferenceFrame;
