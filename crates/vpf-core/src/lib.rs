//! vpf-core: stable foundation for the VPF study workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - gas (ideal-gas constants for air)
//! - error (shared error types)

pub mod error;
pub mod gas;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
