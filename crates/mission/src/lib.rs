//! Access workflows sequenced against a simulation client.
//!
//! The client is always passed in explicitly: scenario building takes a
//! [`ScenarioService`], the outage reports take an [`AccessService`].

pub mod connect;
pub mod recorder;
pub mod route;
pub mod service;
pub mod walker;

use log::{debug, info, warn};
use outage_analysis::{OutageError, OutageResult, max_outage_text};
use outage_config::{
    AircraftConfig, AzimuthConstraintConfig, FacilityRecord, ScenarioConfig, WaypointRecord,
};
use outage_core::{AccessTable, TableError, TimeWindow, Timestamp, TimestampError};

use self::route::{AircraftRoute, RouteError};
use self::service::{AccessService, LlaSample, PositionService, ScenarioService, ServiceError};
use self::walker::{SatelliteSlot, walker_layout};

pub const SENSOR_CONSTELLATION: &str = "SensorConstellation";
pub const FACILITY_CONSTELLATION: &str = "FacilityConstellation";
pub const DEGRADED_CONSTELLATION: &str = "DegradedSensorConstellation";
pub const FACILITY_CHAIN: &str = "FacsToSensors";
pub const AIRCRAFT_CHAIN: &str = "AcftToSensors";

/// Top-level workflow error.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("simulation service error: {0}")]
    Service(#[from] ServiceError),
    #[error("access table error: {0}")]
    Table(#[from] TableError),
    #[error("outage analysis failed for {label}: {source}")]
    Outage {
        label: String,
        #[source]
        source: OutageError,
    },
    #[error("route planning failed: {0}")]
    Route(#[from] RouteError),
    #[error("invalid time: {0}")]
    Time(#[from] TimestampError),
    #[error("no access from {from} to {to} within {window}")]
    NoAccess {
        from: String,
        to: String,
        window: TimeWindow,
    },
}

/// What to do when one facility's intervals fail analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Stop the batch at the first failure.
    #[default]
    Abort,
    /// Log the failure and continue with the next facility.
    Skip,
}

/// Analysis of one labelled access table.
#[derive(Debug, Clone)]
pub struct LabelledOutage {
    pub label: String,
    pub table: AccessTable,
    pub result: OutageResult,
}

/// A facility left out of the batch under [`BatchPolicy::Skip`].
#[derive(Debug, Clone)]
pub struct SkippedFacility {
    pub label: String,
    pub table: AccessTable,
    pub error: OutageError,
}

#[derive(Debug, Clone, Default)]
pub struct FacilityBatch {
    pub outages: Vec<LabelledOutage>,
    pub skipped: Vec<SkippedFacility>,
}

/// Object paths created by [`build_scenario`].
#[derive(Debug, Clone)]
pub struct BuiltScenario {
    pub window: TimeWindow,
    pub facility_paths: Vec<String>,
    pub satellites: Vec<SatelliteSlot>,
    pub sensor_paths: Vec<String>,
}

/// Report label for the facility at a zero-based position: `Fac01`, `Fac02`, ...
pub fn facility_label(index: usize) -> String {
    format!("Fac{:02}", index + 1)
}

/// Longest outage of one access table, reading its `Start Time` / `Stop Time` columns.
pub fn analyze_table(label: &str, table: &AccessTable) -> Result<OutageResult, WorkflowError> {
    let rows = table.interval_text()?;
    max_outage_text(&rows).map_err(|source| WorkflowError::Outage {
        label: label.to_string(),
        source,
    })
}

/// Run the outage analysis once per facility row of a facility-to-sensor chain.
pub fn facility_outages<S: AccessService + ?Sized>(
    service: &S,
    chain: &str,
    window: &TimeWindow,
    policy: BatchPolicy,
) -> Result<FacilityBatch, WorkflowError> {
    let tables = service.object_access(chain, window)?;
    info!("analyzing {} facility access tables of {chain}", tables.len());

    let mut batch = FacilityBatch::default();
    for (index, table) in tables.into_iter().enumerate() {
        let label = facility_label(index);
        match analyze_table(&label, &table) {
            Ok(result) => {
                info!("{label}: {result}");
                batch.outages.push(LabelledOutage {
                    label,
                    table,
                    result,
                });
            }
            Err(WorkflowError::Outage { label, source }) if policy == BatchPolicy::Skip => {
                warn!("skipping {label}: {source}");
                batch.skipped.push(SkippedFacility {
                    label,
                    table,
                    error: source,
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(batch)
}

/// Run the outage analysis on a chain's combined access.
pub fn chain_outage<S: AccessService + ?Sized>(
    service: &S,
    chain: &str,
    window: &TimeWindow,
) -> Result<LabelledOutage, WorkflowError> {
    let table = service.complete_access(chain, window)?;
    debug!("{chain}: {} complete access rows", table.row_count());
    let result = analyze_table(chain, &table)?;
    info!("{chain} max outage: {result}");
    Ok(LabelledOutage {
        label: chain.to_string(),
        table,
        result,
    })
}

/// Start of the first access between two objects.
pub fn first_access_start<S: AccessService + ?Sized>(
    service: &S,
    from: &str,
    to: &str,
    window: &TimeWindow,
) -> Result<Timestamp, WorkflowError> {
    let table = service.pair_access(from, to, window)?;
    let starts = table.column(outage_core::table::START_TIME)?;
    let first = starts.first().ok_or_else(|| WorkflowError::NoAccess {
        from: from.to_string(),
        to: to.to_string(),
        window: *window,
    })?;
    Ok(Timestamp::parse(first)?)
}

/// Time-sampled aircraft position over the window.
pub fn aircraft_positions<S: PositionService + ?Sized>(
    service: &S,
    aircraft: &AircraftConfig,
    window: &TimeWindow,
) -> Result<Vec<LlaSample>, WorkflowError> {
    let path = format!("Aircraft/{}", aircraft.name);
    Ok(service.lla_state(&path, window, aircraft.lla_step_s)?)
}

/// Create the scenario, facilities, satellites with sensors, both constellations,
/// and the facility-to-sensor chain; then apply the facility azimuth constraint.
pub fn build_scenario<S: ScenarioService + ?Sized>(
    service: &mut S,
    config: &ScenarioConfig,
    facilities: &[FacilityRecord],
) -> Result<BuiltScenario, WorkflowError> {
    let window = TimeWindow::parse(&config.start, &config.stop)?;
    service.new_scenario(&config.name, &window)?;

    let mut facility_paths = Vec::with_capacity(facilities.len());
    for facility in facilities {
        for command in connect::facility_commands(facility, &config.facility_color) {
            service.execute_command(&command)?;
        }
        facility_paths.push(format!("Facility/{}", facility.name));
    }
    info!("inserted {} facilities", facility_paths.len());

    let satellites = walker_layout(&config.constellation);
    for slot in &satellites {
        service.insert_satellite(slot)?;
    }
    info!("inserted {} satellites", satellites.len());

    let mut sensor_paths = Vec::with_capacity(satellites.len());
    for slot in &satellites {
        service.attach_sensor(
            &slot.path(),
            &slot.sensor_name(),
            config.sensor.half_cone_deg,
            config.sensor.angular_resolution_deg,
        )?;
        sensor_paths.push(slot.sensor_path());
    }

    service.new_constellation(SENSOR_CONSTELLATION, &sensor_paths)?;
    service.new_constellation(FACILITY_CONSTELLATION, &facility_paths)?;
    service.new_chain(
        FACILITY_CHAIN,
        &[
            format!("Constellation/{FACILITY_CONSTELLATION}"),
            format!("Constellation/{SENSOR_CONSTELLATION}"),
        ],
    )?;

    if let Some(constraint) = &config.facility_constraint {
        apply_azimuth_constraint(service, constraint)?;
    }

    Ok(BuiltScenario {
        window,
        facility_paths,
        satellites,
        sensor_paths,
    })
}

fn apply_azimuth_constraint<S: ScenarioService + ?Sized>(
    service: &mut S,
    constraint: &AzimuthConstraintConfig,
) -> Result<(), WorkflowError> {
    let path = format!("Facility/{}", constraint.facility);
    service.add_azimuth_constraint(&path, constraint.min_deg, constraint.max_deg)?;
    Ok(())
}

/// Insert the aircraft on its route, constrain its elevation, and link it to a
/// sensor constellation missing the configured degraded sensor.
pub fn build_aircraft_chain<S: ScenarioService + ?Sized>(
    service: &mut S,
    aircraft: &AircraftConfig,
    waypoints: &[WaypointRecord],
    start: Timestamp,
    sensor_paths: &[String],
) -> Result<AircraftRoute, WorkflowError> {
    let route = route::plan_route(waypoints, start, aircraft.turn_radius_nm)?;
    service.insert_aircraft(&aircraft.name, &route)?;

    let aircraft_path = format!("Aircraft/{}", aircraft.name);
    service.add_elevation_constraint(&aircraft_path, aircraft.min_elevation_deg)?;

    let degraded: Vec<String> = sensor_paths
        .iter()
        .filter(|path| **path != aircraft.degraded_sensor)
        .cloned()
        .collect();
    if degraded.len() == sensor_paths.len() {
        warn!(
            "degraded sensor {} is not part of {SENSOR_CONSTELLATION}",
            aircraft.degraded_sensor
        );
    }
    service.new_constellation(DEGRADED_CONSTELLATION, &degraded)?;
    service.new_chain(
        AIRCRAFT_CHAIN,
        &[aircraft_path, format!("Constellation/{DEGRADED_CONSTELLATION}")],
    )?;
    Ok(route)
}
