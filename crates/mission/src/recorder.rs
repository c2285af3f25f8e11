//! A [`ScenarioService`] that records every request as one plan line instead of
//! driving an application. Used to preview a build and in tests.

use outage_core::TimeWindow;

use crate::connect::ConnectCommand;
use crate::route::AircraftRoute;
use crate::service::{ScenarioService, ServiceError};
use crate::walker::SatelliteSlot;

#[derive(Debug, Default, Clone)]
pub struct ScenarioRecorder {
    lines: Vec<String>,
}

impl ScenarioRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn push(&mut self, line: String) -> Result<(), ServiceError> {
        self.lines.push(line);
        Ok(())
    }
}

impl ScenarioService for ScenarioRecorder {
    fn new_scenario(&mut self, name: &str, window: &TimeWindow) -> Result<(), ServiceError> {
        self.push(format!("Scenario {name} {window}"))
    }

    fn execute_command(&mut self, command: &ConnectCommand) -> Result<(), ServiceError> {
        self.push(command.to_string())
    }

    fn insert_satellite(&mut self, slot: &SatelliteSlot) -> Result<(), ServiceError> {
        self.push(format!("Satellite {} TwoBody {}", slot.name(), slot.elements))
    }

    fn attach_sensor(
        &mut self,
        satellite: &str,
        sensor: &str,
        half_cone_deg: f64,
        angular_resolution_deg: f64,
    ) -> Result<(), ServiceError> {
        self.push(format!(
            "Sensor {satellite}/Sensor/{sensor} SimpleCone {half_cone_deg} deg resolution {angular_resolution_deg} deg"
        ))
    }

    fn new_constellation(&mut self, name: &str, members: &[String]) -> Result<(), ServiceError> {
        self.push(format!("Constellation {name} [{}]", members.join(", ")))
    }

    fn new_chain(&mut self, name: &str, members: &[String]) -> Result<(), ServiceError> {
        self.push(format!("Chain {name} [{}]", members.join(" -> ")))
    }

    fn add_azimuth_constraint(
        &mut self,
        object: &str,
        min_deg: f64,
        max_deg: f64,
    ) -> Result<(), ServiceError> {
        self.push(format!(
            "Constraint {object} AzimuthAngle min {min_deg} deg max {max_deg} deg"
        ))
    }

    fn add_elevation_constraint(
        &mut self,
        object: &str,
        min_deg: f64,
    ) -> Result<(), ServiceError> {
        self.push(format!("Constraint {object} ElevationAngle min {min_deg} deg"))
    }

    fn insert_aircraft(&mut self, name: &str, route: &AircraftRoute) -> Result<(), ServiceError> {
        self.push(format!(
            "Aircraft {name} GreatArc start {} with {} waypoints",
            route.start,
            route.points.len()
        ))?;
        for point in &route.points {
            self.push(format!(
                "  Waypoint lat {} lon {} alt {:.6} nm speed {} kts turn {} nm",
                point.latitude_deg,
                point.longitude_deg,
                point.altitude_nm,
                point.speed_kts,
                point.turn_radius_nm
            ))?;
        }
        Ok(())
    }
}
