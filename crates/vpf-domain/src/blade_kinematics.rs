//! Blade section kinematics and pitch sweeps.
//!
//! A blade section is oriented by its nominal stagger angle plus the pitch
//! increment commanded by the VPF actuator. Pitch authority is limited to a
//! fixed ±8° window around the nominal setting.

use crate::error::{DomainError, DomainResult};
use std::fmt;
use vpf_core::units::{Angle, deg, rad, to_deg};
use vpf_core::{Real, ensure_finite, linspace};

/// Mechanical pitch authority of the actuator, each side of nominal [deg].
pub const PITCH_AUTHORITY_DEG: Real = 8.0;

/// Default number of points in a pitch sweep.
pub const DEFAULT_SWEEP_POINTS: usize = 17;

/// Lower bound of the pitch authority window.
pub fn min_pitch() -> Angle {
    deg(-PITCH_AUTHORITY_DEG)
}

/// Upper bound of the pitch authority window.
pub fn max_pitch() -> Angle {
    deg(PITCH_AUTHORITY_DEG)
}

/// Whether `pitch` lies inside the authority window (bounds inclusive).
pub fn within_pitch_authority(pitch: Angle) -> bool {
    (min_pitch().value..=max_pitch().value).contains(&pitch.value)
}

/// Geometric orientation of one blade section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeKinematics {
    pitch_angle: Angle,
    stagger_angle: Angle,
    r_over_r: Real,
}

impl BladeKinematics {
    /// Assemble blade kinematics without checking them.
    pub fn new(pitch_angle: Angle, stagger_angle: Angle, r_over_r: Real) -> Self {
        Self {
            pitch_angle,
            stagger_angle,
            r_over_r,
        }
    }

    /// Assemble and validate blade kinematics.
    pub fn try_new(pitch_angle: Angle, stagger_angle: Angle, r_over_r: Real) -> DomainResult<Self> {
        let kin = Self::new(pitch_angle, stagger_angle, r_over_r);
        kin.validate()?;
        Ok(kin)
    }

    /// Build from angles given in degrees, then validate.
    pub fn from_degrees(
        pitch_angle_deg: Real,
        stagger_angle_deg: Real,
        r_over_r: Real,
    ) -> DomainResult<Self> {
        Self::try_new(deg(pitch_angle_deg), deg(stagger_angle_deg), r_over_r)
    }

    /// Same section with another pitch setting.
    pub fn with_pitch(self, pitch_angle: Angle) -> Self {
        Self {
            pitch_angle,
            ..self
        }
    }

    pub fn pitch_angle(&self) -> Angle {
        self.pitch_angle
    }

    pub fn stagger_angle(&self) -> Angle {
        self.stagger_angle
    }

    /// Non-dimensional radial station r/R.
    pub fn r_over_r(&self) -> Real {
        self.r_over_r
    }

    pub fn pitch_angle_deg(&self) -> Real {
        to_deg(self.pitch_angle)
    }

    /// Absolute chord-line angle: stagger plus pitch.
    pub fn chord_angle(&self) -> Angle {
        self.stagger_angle + self.pitch_angle
    }

    pub fn chord_angle_deg(&self) -> Real {
        to_deg(self.chord_angle())
    }

    pub fn validate(&self) -> DomainResult<()> {
        let pitch = ensure_finite(self.pitch_angle.value, "pitch angle")?;
        ensure_finite(self.stagger_angle.value, "stagger angle")?;
        let r = ensure_finite(self.r_over_r, "r/R")?;

        if !within_pitch_authority(self.pitch_angle) {
            return Err(DomainError::PitchOutOfAuthority {
                pitch_deg: to_deg(rad(pitch)),
                limit_deg: PITCH_AUTHORITY_DEG,
            });
        }
        if !(r > 0.0 && r <= 1.0) {
            return Err(DomainError::RadialPositionOutOfRange { r_over_r: r });
        }
        Ok(())
    }

    /// Evenly spaced pitch settings across the full authority window.
    ///
    /// Shorthand for [`PitchSweep::new`] with the default bounds.
    pub fn pitch_sweep(
        stagger_angle: Angle,
        r_over_r: Real,
        n_points: usize,
    ) -> DomainResult<Vec<Self>> {
        PitchSweep::new(stagger_angle, r_over_r)
            .with_points(n_points)
            .generate()
    }
}

impl fmt::Display for BladeKinematics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blade(pitch={:.2}°, stagger={:.2}°, r/R={:.3})",
            self.pitch_angle_deg(),
            to_deg(self.stagger_angle),
            self.r_over_r
        )
    }
}

/// Definition of a pitch sweep at fixed stagger and radial station.
///
/// The bounds default to the authority window. Callers may override them;
/// every generated setting is validated, so an override reaching outside the
/// window is reported instead of silently producing unreachable settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSweep {
    pub stagger_angle: Angle,
    pub r_over_r: Real,
    pub pitch_min: Angle,
    pub pitch_max: Angle,
    pub n_points: usize,
}

impl PitchSweep {
    pub fn new(stagger_angle: Angle, r_over_r: Real) -> Self {
        Self {
            stagger_angle,
            r_over_r,
            pitch_min: min_pitch(),
            pitch_max: max_pitch(),
            n_points: DEFAULT_SWEEP_POINTS,
        }
    }

    pub fn with_bounds(self, pitch_min: Angle, pitch_max: Angle) -> Self {
        Self {
            pitch_min,
            pitch_max,
            ..self
        }
    }

    pub fn with_points(self, n_points: usize) -> Self {
        Self { n_points, ..self }
    }

    /// Materialize the sweep, ordered by ascending pitch.
    ///
    /// Equal bounds yield `n_points` identical settings. Inverted bounds are
    /// rejected with [`DomainError::InvalidArg`] rather than producing a
    /// descending sweep.
    pub fn generate(&self) -> DomainResult<Vec<BladeKinematics>> {
        if self.n_points < 2 {
            return Err(DomainError::SweepTooShort {
                n_points: self.n_points,
            });
        }
        if self.pitch_min.value > self.pitch_max.value {
            return Err(DomainError::InvalidArg {
                what: "pitch_min must not exceed pitch_max",
            });
        }

        let pitches = linspace(self.pitch_min.value, self.pitch_max.value, self.n_points)?;
        let sweep: Vec<BladeKinematics> = pitches
            .into_iter()
            .map(|pitch| BladeKinematics::new(rad(pitch), self.stagger_angle, self.r_over_r))
            .collect();

        for kin in &sweep {
            kin.validate()?;
        }
        Ok(sweep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_angle_is_stagger_plus_pitch() {
        let kin = BladeKinematics::from_degrees(3.0, 30.0, 0.9).unwrap();
        assert!((kin.chord_angle_deg() - 33.0).abs() < 1e-12);
    }

    #[test]
    fn pitch_authority_boundary_is_inclusive() {
        assert!(BladeKinematics::from_degrees(8.0, 0.0, 0.9).is_ok());
        assert!(BladeKinematics::from_degrees(-8.0, 0.0, 0.9).is_ok());
    }

    #[test]
    fn reject_pitch_beyond_authority() {
        let err = BladeKinematics::from_degrees(9.0, 0.0, 0.9).unwrap_err();
        match err {
            DomainError::PitchOutOfAuthority { pitch_deg, limit_deg } => {
                assert!((pitch_deg - 9.0).abs() < 1e-9);
                assert_eq!(limit_deg, PITCH_AUTHORITY_DEG);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stagger_is_unconstrained() {
        assert!(BladeKinematics::from_degrees(0.0, 75.0, 0.5).is_ok());
        assert!(BladeKinematics::from_degrees(0.0, -200.0, 0.5).is_ok());
    }

    #[test]
    fn reject_radial_station_outside_unit_interval() {
        for r in [0.0, -0.1, 1.000_001] {
            let err = BladeKinematics::from_degrees(0.0, 30.0, r).unwrap_err();
            assert!(matches!(err, DomainError::RadialPositionOutOfRange { .. }));
        }
        assert!(BladeKinematics::from_degrees(0.0, 30.0, 1.0).is_ok());
    }

    #[test]
    fn sweep_bounds_and_count() {
        let sweep = BladeKinematics::pitch_sweep(deg(0.0), 0.9, 33).unwrap();
        assert_eq!(sweep.len(), 33);
        assert!((sweep[0].pitch_angle_deg() + 8.0).abs() < 1e-9);
        assert!((sweep[32].pitch_angle_deg() - 8.0).abs() < 1e-9);
        assert!(sweep
            .windows(2)
            .all(|w| w[0].pitch_angle().value < w[1].pitch_angle().value));
    }

    #[test]
    fn sweep_holds_stagger_and_station_fixed() {
        let sweep = BladeKinematics::pitch_sweep(deg(30.0), 0.75, 5).unwrap();
        assert!(sweep
            .iter()
            .all(|k| k.stagger_angle() == deg(30.0) && k.r_over_r() == 0.75));
        assert!((sweep[2].pitch_angle_deg()).abs() < 1e-12);
    }

    #[test]
    fn default_sweep_has_default_point_count() {
        let sweep = PitchSweep::new(deg(10.0), 0.9).generate().unwrap();
        assert_eq!(sweep.len(), DEFAULT_SWEEP_POINTS);
    }

    #[test]
    fn reject_sweep_with_fewer_than_two_points() {
        for n in [0, 1] {
            let err = BladeKinematics::pitch_sweep(deg(0.0), 0.9, n).unwrap_err();
            assert_eq!(err, DomainError::SweepTooShort { n_points: n });
        }
    }

    #[test]
    fn override_outside_authority_is_caught() {
        let err = PitchSweep::new(deg(0.0), 0.9)
            .with_bounds(deg(-10.0), deg(10.0))
            .with_points(5)
            .generate()
            .unwrap_err();
        assert!(matches!(err, DomainError::PitchOutOfAuthority { .. }));
    }

    #[test]
    fn narrower_override_is_accepted() {
        let sweep = PitchSweep::new(deg(0.0), 0.9)
            .with_bounds(deg(-2.0), deg(4.0))
            .with_points(4)
            .generate()
            .unwrap();
        let pitches: Vec<f64> = sweep.iter().map(|k| k.pitch_angle_deg()).collect();
        for (got, want) in pitches.iter().zip([-2.0, 0.0, 2.0, 4.0]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn equal_bounds_repeat_one_setting() {
        let sweep = PitchSweep::new(deg(30.0), 0.9)
            .with_bounds(deg(3.0), deg(3.0))
            .with_points(4)
            .generate()
            .unwrap();
        assert_eq!(sweep.len(), 4);
        assert!(sweep.iter().all(|k| (k.pitch_angle_deg() - 3.0).abs() < 1e-12));
    }

    #[test]
    fn reject_inverted_bounds() {
        let err = PitchSweep::new(deg(0.0), 0.9)
            .with_bounds(deg(4.0), deg(-4.0))
            .generate()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArg { .. }));
    }
}
