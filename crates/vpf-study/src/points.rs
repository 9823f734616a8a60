//! Evaluation of the configured named operating points.

use crate::config::{OperatingPointDef, StudyConfig};
use crate::error::StudyResult;
use crate::sweep::build_flow_state_from_isa;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vpf_aero::{PolarProvider, PolarRequest, TablePolarProvider};
use vpf_core::Real;
use vpf_core::units::{deg, m, to_deg};
use vpf_domain::{
    BladeKinematics, OperatingCondition, OperatingPoint, isa_atmosphere, pitch_for_zero_incidence,
    within_pitch_authority,
};

/// Sectional coefficients looked up at the point's incidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionCoefficients {
    pub airfoil: String,
    /// Reynolds number of the polar actually used.
    pub polar_reynolds: Real,
    pub polar_mach: Real,
    pub cl: Real,
    pub cd: Real,
    pub lift_to_drag: Real,
    /// Incidence was outside the tabulated range and has been clamped.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointEvaluation {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub altitude_m: Real,
    pub mach: Real,
    pub flow_angle_deg: Real,
    pub stagger_deg: Real,
    pub pitch_deg: Real,
    pub incidence_deg: Real,
    pub reynolds: Real,
    pub pitch_to_zero_deg: Real,
    pub feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionCoefficients>,
}

/// Evaluate every configured operating point, in configuration order.
pub fn evaluate_operating_points(config: &StudyConfig) -> StudyResult<Vec<PointEvaluation>> {
    config.validate()?;

    let provider = match &config.airfoil {
        Some(airfoil) => Some((airfoil.id.as_str(), airfoil.provider()?)),
        None => None,
    };

    info!(
        points = config.operating_points.len(),
        polars = provider.as_ref().map_or(0, |(_, p)| p.len()),
        "Evaluating operating points"
    );

    config
        .operating_points
        .iter()
        .map(|def| evaluate_point(config, def, provider.as_ref()))
        .collect()
}

fn evaluate_point(
    config: &StudyConfig,
    def: &OperatingPointDef,
    provider: Option<&(&str, TablePolarProvider)>,
) -> StudyResult<PointEvaluation> {
    let mut point = OperatingPoint::new(def.name.clone(), m(def.altitude_m), def.mach);
    if let Some(description) = &def.description {
        point = point.with_description(description.clone());
    }
    let point = Arc::new(point);

    let flow_angle = deg(def.flow_angle_deg.unwrap_or(config.nominal_flow_angle_deg));
    let stagger = config.stagger();

    let atmosphere = isa_atmosphere(point.altitude())?;
    let flow = build_flow_state_from_isa(point.altitude(), point.mach(), flow_angle)?;
    let blade = BladeKinematics::try_new(deg(def.pitch_deg), stagger, config.r_over_r)?;
    let condition = OperatingCondition::try_new(atmosphere, flow, blade)?
        .with_operating_point(Arc::clone(&point));

    let incidence_deg = condition.incidence_deg()?;
    let reynolds = condition.reynolds_number(config.reference_chord())?;
    let pitch_to_zero = pitch_for_zero_incidence(&flow, stagger);
    let feasible = within_pitch_authority(pitch_to_zero);

    debug!(point = %point, incidence_deg, reynolds, "Operating point evaluated");

    let section = match provider {
        // A static point has no Reynolds number to select a polar with
        Some((airfoil, _)) if reynolds <= 0.0 => {
            warn!(point = %point, airfoil, "No freestream, skipping polar lookup");
            None
        }
        Some((airfoil, provider)) => Some(section_coefficients(
            airfoil,
            provider,
            &condition,
            config,
            incidence_deg,
        )?),
        None => None,
    };

    Ok(PointEvaluation {
        name: point.name().to_string(),
        description: point.description().to_string(),
        altitude_m: point.altitude().value,
        mach: condition.mach_number(),
        flow_angle_deg: to_deg(flow_angle),
        stagger_deg: to_deg(stagger),
        pitch_deg: def.pitch_deg,
        incidence_deg,
        reynolds,
        pitch_to_zero_deg: to_deg(pitch_to_zero),
        feasible,
        section,
    })
}

fn section_coefficients(
    airfoil: &str,
    provider: &TablePolarProvider,
    condition: &OperatingCondition,
    config: &StudyConfig,
    incidence_deg: Real,
) -> StudyResult<SectionCoefficients> {
    let request = PolarRequest::for_condition(airfoil, condition, config.reference_chord())?;
    let polar = provider.generate(&request)?;

    let clamped = incidence_deg < polar.alpha_min_deg() || incidence_deg > polar.alpha_max_deg();
    if clamped {
        warn!(
            airfoil,
            incidence_deg,
            alpha_min_deg = polar.alpha_min_deg(),
            alpha_max_deg = polar.alpha_max_deg(),
            "Incidence outside polar range, clamping"
        );
    }

    Ok(SectionCoefficients {
        airfoil: airfoil.to_string(),
        polar_reynolds: polar.meta().reynolds,
        polar_mach: polar.meta().mach,
        cl: polar.cl_at(incidence_deg, true)?,
        cd: polar.cd_at(incidence_deg, true)?,
        lift_to_drag: polar.ld_at(incidence_deg, true)?,
        clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AirfoilDef, PolarTableDef};

    #[test]
    fn default_points_are_evaluated_in_order() {
        let evals = evaluate_operating_points(&StudyConfig::default()).unwrap();
        let names: Vec<&str> = evals.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["takeoff", "climb", "cruise"]);

        for eval in &evals {
            assert!(eval.incidence_deg.abs() < 1e-9);
            assert!(eval.reynolds > 1.0e6);
            assert!(eval.feasible);
            assert!(eval.section.is_none());
        }
        assert!((evals[2].mach - 0.78).abs() < 1e-12);
    }

    #[test]
    fn flow_angle_override_shows_up_as_incidence() {
        let mut config = StudyConfig::default();
        config.operating_points = vec![OperatingPointDef {
            flow_angle_deg: Some(33.0),
            pitch_deg: 1.0,
            ..OperatingPointDef::new("gust", 3_000.0, 0.5)
        }];
        let evals = evaluate_operating_points(&config).unwrap();
        assert!((evals[0].incidence_deg - 2.0).abs() < 1e-9);
        assert!((evals[0].pitch_to_zero_deg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn section_coefficients_come_from_closest_polar() {
        let table = |reynolds: f64, mach: f64, slope: f64| PolarTableDef {
            reynolds,
            mach,
            alpha_deg: vec![-4.0, 0.0, 4.0],
            cl: vec![-4.0 * slope, 0.0, 4.0 * slope],
            cd: vec![0.01, 0.008, 0.01],
            cm: None,
        };
        let mut config = StudyConfig::default();
        config.operating_points = vec![OperatingPointDef {
            flow_angle_deg: Some(32.0),
            ..OperatingPointDef::new("cruise", 11_000.0, 0.78)
        }];
        config.airfoil = Some(AirfoilDef {
            id: "NACA0012".into(),
            polars: vec![table(1.0e6, 0.3, 0.1), table(2.0e6, 0.8, 0.12)],
        });

        let evals = evaluate_operating_points(&config).unwrap();
        let section = evals[0].section.as_ref().unwrap();
        assert_eq!(section.polar_mach, 0.8);
        assert!((section.cl - 0.24).abs() < 1e-9);
        assert!((section.cd - 0.009).abs() < 1e-9);
        assert!(!section.clamped);
    }

    #[test]
    fn static_point_skips_polar_lookup() {
        let mut config = StudyConfig::default();
        config.operating_points = vec![
            OperatingPointDef::new("ground", 0.0, 0.0),
            OperatingPointDef::new("cruise", 11_000.0, 0.78),
        ];
        config.airfoil = Some(AirfoilDef {
            id: "NACA0012".into(),
            polars: vec![PolarTableDef {
                reynolds: 1.0e6,
                mach: 0.3,
                alpha_deg: vec![-4.0, 0.0, 4.0],
                cl: vec![-0.4, 0.0, 0.4],
                cd: vec![0.01, 0.008, 0.01],
                cm: None,
            }],
        });

        let evals = evaluate_operating_points(&config).unwrap();
        assert_eq!(evals[0].reynolds, 0.0);
        assert!(evals[0].section.is_none());
        assert!(evals[1].section.is_some());
    }
}
