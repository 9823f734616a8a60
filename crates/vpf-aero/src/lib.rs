//! vpf-aero: sectional aerodynamic data for the VPF fan study.
//!
//! Provides:
//! - Airfoil polars with validated tables and linear lookups
//! - The [`PolarProvider`] capability and an in-memory table provider
//! - First-order blade loading, specific-thrust and mesh sizing estimators

pub mod error;
pub mod loading;
pub mod polar;
pub mod provider;

pub use error::{AeroError, AeroResult};
pub use loading::{
    DEFAULT_TARGET_Y_PLUS, blade_loading_coefficient, estimate_specific_thrust,
    incidence_delta_deg, mesh_resolution_hint,
};
pub use polar::{AirfoilPolar, PolarMeta};
pub use provider::{PolarProvider, PolarRequest, TablePolarProvider};
