//! Study configuration file format.
//!
//! Every field has a default, so an empty YAML document is a valid study.

use crate::error::{StudyError, StudyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use vpf_aero::{AirfoilPolar, PolarMeta, TablePolarProvider};
use vpf_core::units::{Angle, Length, deg, m};
use vpf_domain::{PITCH_AUTHORITY_DEG, TROPOSPHERE_LIMIT_M};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub altitude_m: f64,
    pub mach: f64,
    pub nominal_flow_angle_deg: f64,
    pub off_design_flow_angle_deg: f64,
    pub r_over_r: f64,
    pub sweep_points: usize,
    pub pitch_min_deg: f64,
    pub pitch_max_deg: f64,
    /// Blade stagger; defaults to the nominal flow angle so that incidence is
    /// zero at zero pitch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger_deg: Option<f64>,
    /// Chord used as the Reynolds length scale.
    pub reference_chord_m: f64,
    pub operating_points: Vec<OperatingPointDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airfoil: Option<AirfoilDef>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            altitude_m: 11_000.0,
            mach: 0.78,
            nominal_flow_angle_deg: 30.0,
            off_design_flow_angle_deg: 35.0,
            r_over_r: 0.9,
            sweep_points: 33,
            pitch_min_deg: -PITCH_AUTHORITY_DEG,
            pitch_max_deg: PITCH_AUTHORITY_DEG,
            stagger_deg: None,
            reference_chord_m: 0.3,
            operating_points: default_operating_points(),
            airfoil: None,
        }
    }
}

fn default_operating_points() -> Vec<OperatingPointDef> {
    vec![
        OperatingPointDef::new("takeoff", 0.0, 0.25),
        OperatingPointDef::new("climb", 6_000.0, 0.60),
        OperatingPointDef::new("cruise", 11_000.0, 0.78),
    ]
}

/// Named flight condition evaluated by `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingPointDef {
    pub name: String,
    pub altitude_m: f64,
    pub mach: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local inlet flow angle; defaults to the study's nominal flow angle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_angle_deg: Option<f64>,
    #[serde(default)]
    pub pitch_deg: f64,
}

impl OperatingPointDef {
    pub fn new(name: impl Into<String>, altitude_m: f64, mach: f64) -> Self {
        Self {
            name: name.into(),
            altitude_m,
            mach,
            description: None,
            flow_angle_deg: None,
            pitch_deg: 0.0,
        }
    }
}

/// Airfoil used for sectional coefficient lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfoilDef {
    pub id: String,
    pub polars: Vec<PolarTableDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarTableDef {
    pub reynolds: f64,
    pub mach: f64,
    pub alpha_deg: Vec<f64>,
    pub cl: Vec<f64>,
    pub cd: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cm: Option<Vec<f64>>,
}

impl AirfoilDef {
    /// Validated in-memory provider over the configured polars.
    pub fn provider(&self) -> StudyResult<TablePolarProvider> {
        self.polars
            .iter()
            .map(|table| {
                let meta = PolarMeta::new(self.id.clone(), table.reynolds, table.mach)
                    .with_source("config");
                AirfoilPolar::new(
                    meta,
                    table.alpha_deg.clone(),
                    table.cl.clone(),
                    table.cd.clone(),
                    table.cm.clone(),
                )
                .map_err(StudyError::from)
            })
            .collect()
    }
}

impl StudyConfig {
    pub fn altitude(&self) -> Length {
        m(self.altitude_m)
    }

    pub fn reference_chord(&self) -> Length {
        m(self.reference_chord_m)
    }

    pub fn stagger(&self) -> Angle {
        deg(self.stagger_deg.unwrap_or(self.nominal_flow_angle_deg))
    }

    pub fn validate(&self) -> StudyResult<()> {
        check_altitude("altitude_m", self.altitude_m)?;
        check_mach("mach", self.mach)?;
        check_finite("nominal_flow_angle_deg", self.nominal_flow_angle_deg)?;
        check_finite("off_design_flow_angle_deg", self.off_design_flow_angle_deg)?;
        if let Some(stagger) = self.stagger_deg {
            check_finite("stagger_deg", stagger)?;
        }

        if !(self.r_over_r > 0.0 && self.r_over_r <= 1.0) {
            return Err(StudyError::config(format!(
                "r_over_r = {} must lie in (0, 1]",
                self.r_over_r
            )));
        }
        if self.sweep_points < 2 {
            return Err(StudyError::config(format!(
                "sweep_points = {} must be at least 2",
                self.sweep_points
            )));
        }
        check_pitch("pitch_min_deg", self.pitch_min_deg)?;
        check_pitch("pitch_max_deg", self.pitch_max_deg)?;
        if self.pitch_min_deg > self.pitch_max_deg {
            return Err(StudyError::config("pitch_min_deg must not exceed pitch_max_deg"));
        }
        if !(self.reference_chord_m > 0.0 && self.reference_chord_m.is_finite()) {
            return Err(StudyError::config("reference_chord_m must be positive"));
        }

        let mut names = HashSet::new();
        for point in &self.operating_points {
            if point.name.trim().is_empty() {
                return Err(StudyError::config("operating point name cannot be empty"));
            }
            if !names.insert(point.name.as_str()) {
                return Err(StudyError::config(format!(
                    "duplicate operating point: {}",
                    point.name
                )));
            }
            check_altitude("operating point altitude_m", point.altitude_m)?;
            check_mach("operating point mach", point.mach)?;
            if let Some(angle) = point.flow_angle_deg {
                check_finite("operating point flow_angle_deg", angle)?;
            }
            check_pitch("operating point pitch_deg", point.pitch_deg)?;
        }

        if let Some(airfoil) = &self.airfoil {
            if airfoil.id.trim().is_empty() {
                return Err(StudyError::config("airfoil id cannot be empty"));
            }
            if airfoil.polars.is_empty() {
                return Err(StudyError::config("airfoil needs at least one polar"));
            }
            airfoil.provider()?;
        }
        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> StudyResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StudyError::config(format!("{field} = {value} is not finite")))
    }
}

fn check_altitude(field: &str, value: f64) -> StudyResult<()> {
    if (0.0..=TROPOSPHERE_LIMIT_M).contains(&value) {
        Ok(())
    } else {
        Err(StudyError::config(format!(
            "{field} = {value} outside [0, {TROPOSPHERE_LIMIT_M}] m"
        )))
    }
}

fn check_mach(field: &str, value: f64) -> StudyResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StudyError::config(format!(
            "{field} = {value} must be finite and non-negative"
        )))
    }
}

fn check_pitch(field: &str, value: f64) -> StudyResult<()> {
    if (-PITCH_AUTHORITY_DEG..=PITCH_AUTHORITY_DEG).contains(&value) {
        Ok(())
    } else {
        Err(StudyError::config(format!(
            "{field} = {value} outside ±{PITCH_AUTHORITY_DEG} deg pitch authority"
        )))
    }
}

pub fn load_yaml(path: &Path) -> StudyResult<StudyConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: StudyConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &StudyConfig) -> StudyResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
