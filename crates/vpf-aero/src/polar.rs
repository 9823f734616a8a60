//! Two-dimensional airfoil polars.
//!
//! A polar tabulates lift, drag and (optionally) moment coefficients against
//! angle of attack for one Reynolds/Mach pair. Lookups interpolate linearly
//! between tabulated points.

use crate::error::{AeroError, AeroResult};
use vpf_core::{Real, ensure_finite};

/// Context in which a polar was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarMeta {
    /// e.g. "NACA0012" or "CUSTOM:myfoil"
    pub airfoil_id: String,
    pub reynolds: Real,
    pub mach: Real,
    /// Transition amplification factor (typical 7-9).
    pub ncrit: Real,
    /// Where the data came from ("xfoil", "experiment", "table", ...).
    pub source: String,
    pub notes: String,
}

impl PolarMeta {
    pub fn new(airfoil_id: impl Into<String>, reynolds: Real, mach: Real) -> Self {
        Self {
            airfoil_id: airfoil_id.into(),
            reynolds,
            mach,
            ncrit: 9.0,
            source: "unknown".to_string(),
            notes: String::new(),
        }
    }

    pub fn with_source(self, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..self
        }
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self
        }
    }
}

/// Validated airfoil polar.
///
/// Columns are stored with alpha strictly ascending. A table supplied in
/// descending order is reversed on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilPolar {
    meta: PolarMeta,
    alpha_deg: Vec<Real>,
    cl: Vec<Real>,
    cd: Vec<Real>,
    cm: Option<Vec<Real>>,
}

impl AirfoilPolar {
    pub fn new(
        meta: PolarMeta,
        alpha_deg: Vec<Real>,
        cl: Vec<Real>,
        cd: Vec<Real>,
        cm: Option<Vec<Real>>,
    ) -> AeroResult<Self> {
        let mut polar = Self {
            meta,
            alpha_deg,
            cl,
            cd,
            cm,
        };
        polar.validate()?;

        if polar.alpha_deg.len() > 1 && polar.alpha_deg[0] > polar.alpha_deg[1] {
            polar.alpha_deg.reverse();
            polar.cl.reverse();
            polar.cd.reverse();
            if let Some(cm) = polar.cm.as_mut() {
                cm.reverse();
            }
        }
        Ok(polar)
    }

    pub fn meta(&self) -> &PolarMeta {
        &self.meta
    }

    pub fn alpha_deg(&self) -> &[Real] {
        &self.alpha_deg
    }

    pub fn cl(&self) -> &[Real] {
        &self.cl
    }

    pub fn cd(&self) -> &[Real] {
        &self.cd
    }

    pub fn cm(&self) -> Option<&[Real]> {
        self.cm.as_deref()
    }

    pub fn len(&self) -> usize {
        self.alpha_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha_deg.is_empty()
    }

    pub fn validate(&self) -> AeroResult<()> {
        if !(self.meta.reynolds > 0.0) {
            return Err(AeroError::InvalidPolar {
                what: "Reynolds number must be positive",
            });
        }
        if !(self.meta.mach >= 0.0) {
            return Err(AeroError::InvalidPolar {
                what: "Mach number cannot be negative",
            });
        }

        let n = self.alpha_deg.len();
        if n < 3 {
            return Err(AeroError::InvalidPolar {
                what: "polar must contain at least 3 points",
            });
        }
        if self.cl.len() != n || self.cd.len() != n {
            return Err(AeroError::InvalidPolar {
                what: "alpha, cl and cd must have the same length",
            });
        }
        if self.cm.as_ref().is_some_and(|cm| cm.len() != n) {
            return Err(AeroError::InvalidPolar {
                what: "cm must have the same length as alpha",
            });
        }

        let all_finite = |v: &[Real]| v.iter().all(|x| x.is_finite());
        if !all_finite(&self.alpha_deg) {
            return Err(AeroError::InvalidPolar {
                what: "alpha contains non-finite values",
            });
        }
        if !all_finite(&self.cl) || !all_finite(&self.cd) {
            return Err(AeroError::InvalidPolar {
                what: "cl/cd contain non-finite values",
            });
        }
        if self.cm.as_deref().is_some_and(|cm| !all_finite(cm)) {
            return Err(AeroError::InvalidPolar {
                what: "cm contains non-finite values",
            });
        }
        if self.cd.iter().any(|&cd| cd < 0.0) {
            return Err(AeroError::InvalidPolar {
                what: "cd contains negative values",
            });
        }

        let ascending = self.alpha_deg.windows(2).all(|w| w[1] > w[0]);
        let descending = self.alpha_deg.windows(2).all(|w| w[1] < w[0]);
        if !(ascending || descending) {
            return Err(AeroError::InvalidPolar {
                what: "alpha must be strictly monotonic",
            });
        }
        Ok(())
    }

    pub fn alpha_min_deg(&self) -> Real {
        self.alpha_deg.iter().copied().fold(Real::INFINITY, Real::min)
    }

    pub fn alpha_max_deg(&self) -> Real {
        self.alpha_deg
            .iter()
            .copied()
            .fold(Real::NEG_INFINITY, Real::max)
    }

    fn interp(&self, alpha_deg: Real, ys: &[Real], clamp: bool) -> AeroResult<Real> {
        let alpha = ensure_finite(alpha_deg, "alpha")?;
        let (min, max) = (self.alpha_min_deg(), self.alpha_max_deg());

        let xq = if clamp {
            alpha.clamp(min, max)
        } else if (min..=max).contains(&alpha) {
            alpha
        } else {
            return Err(AeroError::AlphaOutOfRange {
                alpha_deg: alpha,
                min_deg: min,
                max_deg: max,
            });
        };

        let xs = &self.alpha_deg;
        let n = xs.len();
        // first index with alpha > xq; xq >= xs[0] so idx >= 1
        let idx = xs.partition_point(|&a| a <= xq);
        if idx >= n {
            return Ok(ys[n - 1]);
        }
        let i = idx - 1;
        let t = (xq - xs[i]) / (xs[i + 1] - xs[i]);
        Ok(ys[i] + t * (ys[i + 1] - ys[i]))
    }

    /// Lift coefficient at `alpha_deg`.
    pub fn cl_at(&self, alpha_deg: Real, clamp: bool) -> AeroResult<Real> {
        self.interp(alpha_deg, &self.cl, clamp)
    }

    /// Drag coefficient at `alpha_deg`.
    pub fn cd_at(&self, alpha_deg: Real, clamp: bool) -> AeroResult<Real> {
        self.interp(alpha_deg, &self.cd, clamp)
    }

    /// Moment coefficient at `alpha_deg`; fails when the polar has no CM.
    pub fn cm_at(&self, alpha_deg: Real, clamp: bool) -> AeroResult<Real> {
        match self.cm.as_deref() {
            Some(cm) => self.interp(alpha_deg, cm, clamp),
            None => Err(AeroError::MissingMoment {
                airfoil: self.meta.airfoil_id.clone(),
            }),
        }
    }

    /// Lift-to-drag ratio at `alpha_deg`.
    pub fn ld_at(&self, alpha_deg: Real, clamp: bool) -> AeroResult<Real> {
        let cd = self.cd_at(alpha_deg, clamp)?;
        if cd <= 0.0 {
            return Err(AeroError::InvalidArg {
                what: "cd is non-positive; cannot compute L/D",
            });
        }
        Ok(self.cl_at(alpha_deg, clamp)? / cd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_plate() -> AirfoilPolar {
        AirfoilPolar::new(
            PolarMeta::new("FLAT", 1.0e6, 0.3),
            vec![-4.0, 0.0, 4.0, 8.0],
            vec![-0.44, 0.0, 0.44, 0.88],
            vec![0.012, 0.008, 0.012, 0.022],
            None,
        )
        .unwrap()
    }

    #[test]
    fn interpolates_between_points() {
        let polar = flat_plate();
        assert!((polar.cl_at(2.0, false).unwrap() - 0.22).abs() < 1e-12);
        assert!((polar.cd_at(6.0, false).unwrap() - 0.017).abs() < 1e-12);
        assert_eq!(polar.cl_at(8.0, false).unwrap(), 0.88);
        assert_eq!(polar.cl_at(-4.0, false).unwrap(), -0.44);
    }

    #[test]
    fn clamps_or_rejects_outside_range() {
        let polar = flat_plate();
        assert_eq!(polar.cl_at(12.0, true).unwrap(), 0.88);
        let err = polar.cl_at(12.0, false).unwrap_err();
        assert!(matches!(err, AeroError::AlphaOutOfRange { .. }));
    }

    #[test]
    fn lift_to_drag_ratio() {
        let polar = flat_plate();
        assert!((polar.ld_at(4.0, false).unwrap() - 0.44 / 0.012).abs() < 1e-9);
    }

    #[test]
    fn missing_moment_is_reported() {
        let err = flat_plate().cm_at(0.0, true).unwrap_err();
        assert!(matches!(err, AeroError::MissingMoment { .. }));
    }

    #[test]
    fn descending_table_is_reordered() {
        let polar = AirfoilPolar::new(
            PolarMeta::new("FLAT", 1.0e6, 0.3),
            vec![4.0, 0.0, -4.0],
            vec![0.44, 0.0, -0.44],
            vec![0.012, 0.008, 0.012],
            Some(vec![-0.01, 0.0, 0.01]),
        )
        .unwrap();
        assert_eq!(polar.alpha_deg(), &[-4.0, 0.0, 4.0]);
        assert_eq!(polar.cm().unwrap(), &[0.01, 0.0, -0.01]);
        assert!((polar.cl_at(2.0, false).unwrap() - 0.22).abs() < 1e-12);
    }

    #[test]
    fn rejects_inconsistent_tables() {
        let meta = PolarMeta::new("X", 1.0e6, 0.3);
        let too_short = AirfoilPolar::new(meta.clone(), vec![0.0, 1.0], vec![0.0, 0.1], vec![0.01, 0.01], None);
        assert!(too_short.is_err());

        let mismatched = AirfoilPolar::new(meta.clone(), vec![0.0, 1.0, 2.0], vec![0.0, 0.1], vec![0.01; 3], None);
        assert!(mismatched.is_err());

        let negative_cd = AirfoilPolar::new(meta.clone(), vec![0.0, 1.0, 2.0], vec![0.0; 3], vec![0.01, -0.01, 0.01], None);
        assert!(negative_cd.is_err());

        let non_monotonic = AirfoilPolar::new(meta.clone(), vec![0.0, 2.0, 1.0], vec![0.0; 3], vec![0.01; 3], None);
        assert!(non_monotonic.is_err());

        let bad_re = AirfoilPolar::new(PolarMeta::new("X", 0.0, 0.3), vec![0.0, 1.0, 2.0], vec![0.0; 3], vec![0.01; 3], None);
        assert!(bad_re.is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamped_lookup_stays_within_tabulated_cl(alpha in -30.0_f64..30.0) {
            let polar = AirfoilPolar::new(
                PolarMeta::new("FLAT", 1.0e6, 0.3),
                vec![-10.0, -4.0, 0.0, 4.0, 10.0],
                vec![-0.8, -0.44, 0.0, 0.44, 0.9],
                vec![0.05, 0.012, 0.008, 0.012, 0.06],
                None,
            ).unwrap();
            let cl = polar.cl_at(alpha, true).unwrap();
            prop_assert!((-0.8..=0.9).contains(&cl));
        }
    }
}
