//! Complete operating condition for sectional fan-blade analysis.

use crate::atmosphere::AtmosphereState;
use crate::blade_kinematics::BladeKinematics;
use crate::error::DomainResult;
use crate::flow_state::FlowState;
use crate::incidence::compute_incidence;
use crate::operating_point::OperatingPoint;
use std::sync::Arc;
use vpf_core::Real;
use vpf_core::units::{Angle, Length, to_deg};

/// One self-consistent analysis case.
///
/// Owns its atmosphere, flow state and blade kinematics by value. The
/// optional [`OperatingPoint`] is shared, since the same named point usually
/// labels many conditions (every setting of a pitch sweep, for instance).
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingCondition {
    atmosphere: AtmosphereState,
    flow_state: FlowState,
    blade_kinematics: BladeKinematics,
    operating_point: Option<Arc<OperatingPoint>>,
}

impl OperatingCondition {
    /// Aggregate without checking. Call [`validate`](Self::validate) before
    /// reading derived views.
    pub fn new(
        atmosphere: AtmosphereState,
        flow_state: FlowState,
        blade_kinematics: BladeKinematics,
    ) -> Self {
        Self {
            atmosphere,
            flow_state,
            blade_kinematics,
            operating_point: None,
        }
    }

    /// Aggregate and validate.
    pub fn try_new(
        atmosphere: AtmosphereState,
        flow_state: FlowState,
        blade_kinematics: BladeKinematics,
    ) -> DomainResult<Self> {
        let condition = Self::new(atmosphere, flow_state, blade_kinematics);
        condition.validate()?;
        Ok(condition)
    }

    /// Attach a named operating point.
    pub fn with_operating_point(self, point: Arc<OperatingPoint>) -> Self {
        Self {
            operating_point: Some(point),
            ..self
        }
    }

    /// Same condition with another blade setting.
    pub fn with_blade(self, blade_kinematics: BladeKinematics) -> Self {
        Self {
            blade_kinematics,
            ..self
        }
    }

    pub fn atmosphere(&self) -> &AtmosphereState {
        &self.atmosphere
    }

    pub fn flow_state(&self) -> &FlowState {
        &self.flow_state
    }

    pub fn blade_kinematics(&self) -> &BladeKinematics {
        &self.blade_kinematics
    }

    pub fn operating_point(&self) -> Option<&OperatingPoint> {
        self.operating_point.as_deref()
    }

    /// Validate atmosphere, flow state and blade in that order.
    ///
    /// The first failing sub-check is returned unchanged.
    pub fn validate(&self) -> DomainResult<()> {
        self.atmosphere.validate()?;
        self.flow_state.validate()?;
        self.blade_kinematics.validate()?;
        Ok(())
    }

    pub fn incidence(&self) -> DomainResult<Angle> {
        compute_incidence(&self.flow_state, &self.blade_kinematics)
    }

    pub fn incidence_deg(&self) -> DomainResult<Real> {
        self.incidence().map(to_deg)
    }

    pub fn mach_number(&self) -> Real {
        self.flow_state.mach_number()
    }

    /// Reynolds number based on `characteristic_length`, with the viscosity
    /// taken from the atmosphere.
    pub fn reynolds_number(&self, characteristic_length: Length) -> DomainResult<Real> {
        self.flow_state
            .reynolds_number(characteristic_length, self.atmosphere.dynamic_viscosity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;
    use crate::atmosphere::isa_atmosphere;
    use vpf_core::units::{deg, k, kgpm3, m, mps, pa};

    fn cruise_condition(velocity: f64, pitch_deg: f64) -> OperatingCondition {
        let atm = isa_atmosphere(m(11_000.0)).unwrap();
        let flow = FlowState::from_atmosphere(&atm, mps(velocity), deg(35.0));
        let blade = BladeKinematics::new(deg(pitch_deg), deg(30.0), 0.9);
        OperatingCondition::new(atm, flow, blade)
    }

    #[test]
    fn valid_condition_exposes_derived_views() {
        let cond = cruise_condition(230.0, 0.0);
        cond.validate().unwrap();
        assert!((cond.incidence_deg().unwrap() - 5.0).abs() < 1e-9);
        let a = cond.atmosphere().speed_of_sound().value;
        assert!((cond.mach_number() - 230.0 / a).abs() < 1e-12);
    }

    #[test]
    fn reynolds_uses_atmosphere_viscosity() {
        let cond = cruise_condition(230.0, 0.0);
        let chord = m(0.2);
        let expected = cond
            .flow_state()
            .reynolds_number(chord, cond.atmosphere().dynamic_viscosity())
            .unwrap();
        assert_eq!(cond.reynolds_number(chord).unwrap(), expected);
    }

    #[test]
    fn flow_error_is_reported_as_is() {
        let cond = cruise_condition(-10.0, 0.0);
        let err = cond.validate().unwrap_err();
        assert!(matches!(err, DomainError::NonPhysical { what: "velocity", .. }));
    }

    #[test]
    fn atmosphere_error_wins_over_later_errors() {
        let atm = AtmosphereState::new(m(0.0), k(-1.0), pa(101_325.0), kgpm3(1.225));
        let flow = FlowState::new(mps(-1.0), deg(0.0), pa(101_325.0), k(288.15), kgpm3(1.225));
        let blade = BladeKinematics::new(deg(30.0), deg(0.0), 2.0);
        let err = OperatingCondition::new(atm, flow, blade).validate().unwrap_err();
        assert!(matches!(err, DomainError::NonPhysical { what: "temperature", .. }));
    }

    #[test]
    fn blade_error_reported_when_rest_is_valid() {
        let err = OperatingCondition::try_new(
            isa_atmosphere(m(0.0)).unwrap(),
            FlowState::new(mps(50.0), deg(0.0), pa(101_325.0), k(288.15), kgpm3(1.225)),
            BladeKinematics::new(deg(0.0), deg(0.0), 1.5),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::RadialPositionOutOfRange { .. }));
    }

    #[test]
    fn operating_point_is_shared_not_owned() {
        let point = Arc::new(OperatingPoint::new("cruise", m(11_000.0), 0.78));
        let a = cruise_condition(230.0, 0.0).with_operating_point(Arc::clone(&point));
        let b = cruise_condition(230.0, 2.0).with_operating_point(Arc::clone(&point));
        assert_eq!(Arc::strong_count(&point), 3);
        assert_eq!(a.operating_point().map(|p| p.name()), Some("cruise"));
        assert_eq!(b.operating_point(), a.operating_point());
    }

    #[test]
    fn with_blade_keeps_other_parts() {
        let cond = cruise_condition(230.0, 0.0);
        let blade = cond.blade_kinematics().with_pitch(deg(5.0));
        let moved = cond.clone().with_blade(blade);
        assert_eq!(moved.flow_state(), cond.flow_state());
        assert!(moved.incidence_deg().unwrap().abs() < 1e-9);
    }
}
