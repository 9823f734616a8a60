//! Scalar helpers shared by every crate.

use crate::CoreError;

pub type Real = f64;

/// Mixed absolute/relative comparison tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    pub fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }
}

/// `a` and `b` agree within `tol.abs` or within `tol.rel` of the larger one.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `value` through if finite, otherwise report it under `what`.
pub fn ensure_finite(value: Real, what: &'static str) -> Result<Real, CoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::NonFinite { what, value })
    }
}

/// Evenly spaced values from `start` to `end`, both endpoints included.
///
/// The last point is pinned to `end` so that accumulated rounding never
/// pushes it past the requested bound.
pub fn linspace(start: Real, end: Real, num_points: usize) -> Result<Vec<Real>, CoreError> {
    ensure_finite(start, "linspace start")?;
    ensure_finite(end, "linspace end")?;
    if num_points < 2 {
        return Err(CoreError::InvalidArg {
            what: "linspace needs at least 2 points",
        });
    }

    let delta = (end - start) / (num_points - 1) as Real;
    let mut points: Vec<Real> = (0..num_points)
        .map(|i| start + i as Real * delta)
        .collect();

    // Ensure exact endpoint
    points[num_points - 1] = end;
    Ok(points)
}
