//! Typed client seams for the external simulation application.
//!
//! Each query the workflows need is a distinct method; implementations decide
//! whether they talk to a live application or replay recorded tables.

pub use outage_core::LlaSample;
use outage_core::{AccessTable, TableError, TimeWindow};
use thiserror::Error;

use crate::connect::ConnectCommand;
use crate::route::AircraftRoute;
use crate::walker::SatelliteSlot;

/// Errors reported by a simulation client.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("object `{0}` is not known to the simulation service")]
    UnknownObject(String),
    #[error("`{request}` rejected: {reason}")]
    Rejected { request: String, reason: String },
    #[error("malformed access table for `{object}`: {source}")]
    Table {
        object: String,
        #[source]
        source: TableError,
    },
    #[error("simulation backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Interval queries against computed access.
pub trait AccessService {
    /// Per-object access of a chain, one table per object in the chain's first stage.
    fn object_access(&self, chain: &str, window: &TimeWindow)
    -> Result<Vec<AccessTable>, ServiceError>;

    /// Combined access across every stage of a chain.
    fn complete_access(&self, chain: &str, window: &TimeWindow)
    -> Result<AccessTable, ServiceError>;

    /// Access between two objects after their constraints are applied.
    fn pair_access(
        &self,
        from: &str,
        to: &str,
        window: &TimeWindow,
    ) -> Result<AccessTable, ServiceError>;
}

/// Time-sampled position queries.
pub trait PositionService {
    fn lla_state(
        &self,
        object: &str,
        window: &TimeWindow,
        step_s: f64,
    ) -> Result<Vec<LlaSample>, ServiceError>;
}

/// Object creation and configuration in the simulation scenario.
pub trait ScenarioService {
    fn new_scenario(&mut self, name: &str, window: &TimeWindow) -> Result<(), ServiceError>;

    /// Run a textual command in the application's command language.
    fn execute_command(&mut self, command: &ConnectCommand) -> Result<(), ServiceError>;

    /// Insert a satellite on a two-body propagator and propagate it.
    fn insert_satellite(&mut self, slot: &SatelliteSlot) -> Result<(), ServiceError>;

    /// Attach a simple conic sensor to a satellite.
    fn attach_sensor(
        &mut self,
        satellite: &str,
        sensor: &str,
        half_cone_deg: f64,
        angular_resolution_deg: f64,
    ) -> Result<(), ServiceError>;

    fn new_constellation(&mut self, name: &str, members: &[String]) -> Result<(), ServiceError>;

    fn new_chain(&mut self, name: &str, members: &[String]) -> Result<(), ServiceError>;

    fn add_azimuth_constraint(
        &mut self,
        object: &str,
        min_deg: f64,
        max_deg: f64,
    ) -> Result<(), ServiceError>;

    fn add_elevation_constraint(&mut self, object: &str, min_deg: f64)
    -> Result<(), ServiceError>;

    /// Insert an aircraft on a great-arc route and propagate it.
    fn insert_aircraft(&mut self, name: &str, route: &AircraftRoute) -> Result<(), ServiceError>;
}
