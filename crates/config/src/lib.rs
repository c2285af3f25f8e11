//! Configuration models and loaders for access outage scenarios.

use std::fs::File;
use std::path::{Path, PathBuf};

use outage_core::{TimeWindow, TimestampError};
use serde::Deserialize;
use thiserror::Error;

/// Scenario manifest describing the objects to build and the analysis window.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    /// UTCG window start, e.g. `"1 Jun 2016 15:00:00.000"`.
    pub start: String,
    pub stop: String,
    /// Facility list (`name,longitude,latitude` rows), relative to the manifest.
    pub facilities_file: PathBuf,
    #[serde(default = "default_facility_color")]
    pub facility_color: String,
    pub constellation: ConstellationConfig,
    pub sensor: SensorConfig,
    #[serde(default)]
    pub facility_constraint: Option<AzimuthConstraintConfig>,
    #[serde(default)]
    pub aircraft: Option<AircraftConfig>,
}

/// Walker-style layout of identical circular two-body orbits.
#[derive(Debug, Deserialize, Clone)]
pub struct ConstellationConfig {
    pub planes: u32,
    pub sats_per_plane: u32,
    pub semi_major_axis_km: f64,
    #[serde(default)]
    pub eccentricity: f64,
    pub inclination_deg: f64,
    #[serde(default)]
    pub arg_of_perigee_deg: f64,
    /// RAAN range spread over the planes (180 for a polar star pattern).
    #[serde(default = "default_raan_span")]
    pub raan_span_deg: u32,
    /// Offset true anomaly by half a slot on odd planes.
    #[serde(default = "default_true")]
    pub stagger: bool,
}

/// Simple conic sensor attached to every satellite.
#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    pub half_cone_deg: f64,
    #[serde(default = "default_angular_resolution")]
    pub angular_resolution_deg: f64,
}

/// Azimuth window applied to one facility before a pairwise access query.
#[derive(Debug, Deserialize, Clone)]
pub struct AzimuthConstraintConfig {
    pub facility: String,
    /// Target object path relative to the scenario, e.g. `Satellite/Sat11`.
    pub target: String,
    pub min_deg: f64,
    pub max_deg: f64,
}

/// Aircraft flown along a great-arc route and linked to the degraded sensor constellation.
#[derive(Debug, Deserialize, Clone)]
pub struct AircraftConfig {
    pub name: String,
    /// Flight plan (`latitude,longitude,altitude_ft,speed_kts` after one header line).
    pub flight_plan_file: PathBuf,
    /// Minutes after the first constrained facility access at which the route starts.
    #[serde(default = "default_start_offset")]
    pub start_offset_min: f64,
    #[serde(default = "default_turn_radius")]
    pub turn_radius_nm: f64,
    #[serde(default = "default_min_elevation")]
    pub min_elevation_deg: f64,
    /// Sensor path dropped from the degraded constellation.
    pub degraded_sensor: String,
    #[serde(default = "default_lla_step")]
    pub lla_step_s: f64,
}

/// One row of the facility list.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FacilityRecord {
    pub name: String,
    pub longitude_deg: f64,
    pub latitude_deg: f64,
}

/// One row of the flight plan.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WaypointRecord {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_ft: f64,
    pub speed_kts: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse delimited file: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid scenario window: {0}")]
    Window(#[from] TimestampError),
    #[error("invalid scenario configuration: {0}")]
    Invalid(String),
}

impl ScenarioConfig {
    /// Parsed analysis window.
    pub fn window(&self) -> Result<TimeWindow, ConfigError> {
        Ok(TimeWindow::parse(&self.start, &self.stop)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.constellation;
        if c.planes == 0 || c.sats_per_plane == 0 {
            return Err(ConfigError::Invalid(
                "constellation needs at least one plane and one satellite per plane".into(),
            ));
        }
        if c.raan_span_deg < c.planes || 360 < c.sats_per_plane {
            return Err(ConfigError::Invalid(format!(
                "{} planes over {} deg RAAN with {} satellites per plane cannot be spaced in whole degrees",
                c.planes, c.raan_span_deg, c.sats_per_plane
            )));
        }
        if !(0.0..1.0).contains(&c.eccentricity) {
            return Err(ConfigError::Invalid(format!(
                "eccentricity {} is not elliptical",
                c.eccentricity
            )));
        }
        if !(0.0..=90.0).contains(&self.sensor.half_cone_deg) {
            return Err(ConfigError::Invalid(format!(
                "sensor half-cone {} deg outside 0..=90",
                self.sensor.half_cone_deg
            )));
        }
        if let Some(constraint) = &self.facility_constraint {
            if constraint.max_deg < constraint.min_deg {
                return Err(ConfigError::Invalid(format!(
                    "azimuth constraint on {} has max below min",
                    constraint.facility
                )));
            }
        }
        self.window()?;
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.facilities_file = resolve(base, &self.facilities_file);
        if let Some(aircraft) = &mut self.aircraft {
            aircraft.flight_plan_file = resolve(base, &aircraft.flight_plan_file);
        }
    }
}

/// Load a scenario manifest from TOML (by extension) or YAML.
///
/// Relative data-file paths are resolved against the manifest's directory.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let mut scenario: ScenarioConfig = load_record(path)?;
    scenario.validate()?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    scenario.resolve_paths(base);
    Ok(scenario)
}

/// Load the facility list: one `name,longitude,latitude` row per facility, no header.
pub fn load_facilities<P: AsRef<Path>>(path: P) -> Result<Vec<FacilityRecord>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let facilities = reader
        .deserialize()
        .collect::<Result<Vec<FacilityRecord>, _>>()?;
    Ok(facilities)
}

/// Load a flight plan, skipping its header line and reading columns by position.
pub fn load_flight_plan<P: AsRef<Path>>(path: P) -> Result<Vec<WaypointRecord>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut waypoints = Vec::new();
    for record in reader.records() {
        let waypoint: WaypointRecord = record?.deserialize(None)?;
        waypoints.push(waypoint);
    }
    Ok(waypoints)
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn default_facility_color() -> String {
    "cyan".to_string()
}

fn default_raan_span() -> u32 {
    180
}

fn default_true() -> bool {
    true
}

fn default_angular_resolution() -> f64 {
    2.0
}

fn default_start_offset() -> f64 {
    30.0
}

fn default_turn_radius() -> f64 {
    1.8
}

fn default_min_elevation() -> f64 {
    10.0
}

fn default_lla_step() -> f64 {
    600.0
}
