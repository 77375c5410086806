//! Measurement job file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use ripple_core::{
    AnalysisConfig, EvaluationRange, FlankTraces, GearGeometry, RippleTolerance, Side, ToothId,
    ToothTrace,
};

use crate::error::ConfigError;

/// Serialization format of a job file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl JobFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(JobFormat::Toml),
            Some("json") => Ok(JobFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Gear parameters as written in a job file.
///
/// Angles are in degrees. `base_diameter` overrides the value derived from
/// module and pressure angle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GearSection {
    /// Number of teeth Z.
    pub teeth: u32,
    /// Normal module mₙ (mm).
    pub module: f64,
    /// Normal pressure angle αₙ.
    #[serde(default = "default_pressure_angle")]
    pub pressure_angle: f64,
    /// Helix angle β; 0 for spur gears.
    #[serde(default)]
    pub helix_angle: f64,
    /// Measured base diameter d_b (mm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_diameter: Option<f64>,
}

fn default_pressure_angle() -> f64 {
    20.0
}

impl GearSection {
    /// Create a gear section with default angles.
    pub fn new(teeth: u32, module: f64) -> Self {
        Self {
            teeth,
            module,
            pressure_angle: default_pressure_angle(),
            helix_angle: 0.0,
            base_diameter: None,
        }
    }
}

/// Traces and evaluation range of one direction.
///
/// Tooth keys are tooth numbers as strings (`"1"`, `"2"`, ...). Keys that
/// are not plain numbers are kept but become [`ToothId::Unknown`] and are
/// skipped by the analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionData {
    /// Evaluated and measured extent of every trace.
    pub range: EvaluationRange,
    /// Left flank traces by tooth key.
    #[serde(default)]
    pub left: BTreeMap<String, Vec<f64>>,
    /// Right flank traces by tooth key.
    #[serde(default)]
    pub right: BTreeMap<String, Vec<f64>>,
}

impl DirectionData {
    /// Empty data for `range`.
    pub fn new(range: EvaluationRange) -> Self {
        Self {
            range,
            left: BTreeMap::new(),
            right: BTreeMap::new(),
        }
    }

    /// Traces of one side keyed by tooth.
    pub fn side(&self, side: Side) -> &BTreeMap<String, Vec<f64>> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Mutable traces of one side keyed by tooth.
    pub fn side_mut(&mut self, side: Side) -> &mut BTreeMap<String, Vec<f64>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Convert into core traces, ordered by tooth number.
    ///
    /// Unknown tooth keys sort after numbered teeth.
    pub fn traces(&self) -> FlankTraces {
        let convert = |map: &BTreeMap<String, Vec<f64>>| {
            let mut traces: Vec<ToothTrace> = map
                .iter()
                .map(|(key, values)| ToothTrace::new(ToothId::parse(key), values.clone()))
                .collect();
            traces.sort_by_key(|t| t.tooth);
            traces
        };
        FlankTraces {
            left: convert(&self.left),
            right: convert(&self.right),
        }
    }

    /// Tooth keys that do not name a tooth number.
    pub fn unknown_teeth(&self) -> Vec<&str> {
        self.left
            .keys()
            .chain(self.right.keys())
            .filter(|key| ToothId::parse(key) == ToothId::Unknown)
            .map(String::as_str)
            .collect()
    }

    /// Total number of traces on both sides.
    pub fn trace_count(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

/// A gear measurement and the settings to analyse it.
///
/// # TOML Format
///
/// ```toml
/// name = "Pinion 87T"
///
/// [gear]
/// teeth = 87
/// module = 1.859
/// pressure_angle = 18.6
/// helix_angle = 25.3
///
/// [analysis]
/// component_count = 10
/// amplitude_scale = 0.1
///
/// [tolerance]
/// r = 2.0
/// n0 = 1.0
/// k = 0.0
///
/// [profile.range]
/// eval_start = 166.0
/// eval_end = 172.0
/// meas_start = 165.5
/// meas_end = 172.5
///
/// [profile.left]
/// "1" = [0.12, 0.10, 0.07]
/// "2" = [0.11, 0.09, 0.08]
/// ```
///
/// `[analysis]` and `[tolerance]` are optional and fall back to defaults;
/// `[profile]` and `[helix]` are each optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementJob {
    /// Optional label shown in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Gear parameters.
    pub gear: GearSection,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Limit curve for tolerance checks.
    #[serde(default)]
    pub tolerance: RippleTolerance,

    /// Profile traces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<DirectionData>,

    /// Helix (lead) traces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helix: Option<DirectionData>,
}

impl MeasurementJob {
    /// Create a job with no traces.
    pub fn new(gear: GearSection) -> Self {
        Self {
            name: None,
            gear,
            analysis: AnalysisConfig::default(),
            tolerance: RippleTolerance::default(),
            profile: None,
            helix: None,
        }
    }

    /// Set the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the analysis settings.
    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Set the profile data.
    pub fn with_profile(mut self, profile: DirectionData) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the helix data.
    pub fn with_helix(mut self, helix: DirectionData) -> Self {
        self.helix = Some(helix);
        self
    }

    /// Load a job from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = JobFormat::from_path(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        match format {
            JobFormat::Toml => Self::from_toml(&content),
            JobFormat::Json => Self::from_json(&content),
        }
    }

    /// Save the job; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match JobFormat::from_path(path)? {
            JobFormat::Toml => self.to_toml()?,
            JobFormat::Json => self.to_json()?,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Parse a job from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the job to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse a job from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert the job to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Gear geometry; fails on impossible parameters.
    pub fn geometry(&self) -> Result<GearGeometry, ConfigError> {
        Ok(GearGeometry::new(
            self.gear.teeth,
            self.gear.module,
            self.gear.pressure_angle,
            self.gear.helix_angle,
            self.gear.base_diameter,
        )?)
    }

    /// Analysis settings, validated against the tooth count.
    pub fn config(&self) -> Result<AnalysisConfig, ConfigError> {
        self.analysis.validate_for(self.gear.teeth)?;
        Ok(self.analysis)
    }

    /// Profile traces, empty if the job has none.
    pub fn profile_traces(&self) -> FlankTraces {
        self.profile
            .as_ref()
            .map(DirectionData::traces)
            .unwrap_or_default()
    }

    /// Helix traces, empty if the job has none.
    pub fn helix_traces(&self) -> FlankTraces {
        self.helix
            .as_ref()
            .map(DirectionData::traces)
            .unwrap_or_default()
    }

    /// Profile evaluation range, or a zero range without profile data.
    pub fn profile_range(&self) -> EvaluationRange {
        self.profile
            .as_ref()
            .map_or(EvaluationRange::new(0.0, 0.0, 0.0, 0.0), |p| p.range)
    }

    /// Helix evaluation range, or a zero range without helix data.
    pub fn helix_range(&self) -> EvaluationRange {
        self.helix
            .as_ref()
            .map_or(EvaluationRange::new(0.0, 0.0, 0.0, 0.0), |h| h.range)
    }

    /// Tooth keys across the job that do not name a tooth number.
    pub fn unknown_teeth(&self) -> Vec<&str> {
        self.profile
            .iter()
            .chain(self.helix.iter())
            .flat_map(DirectionData::unknown_teeth)
            .collect()
    }
}
