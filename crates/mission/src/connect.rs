//! Command-language lines used to create and place facilities.

use std::fmt;

use outage_config::FacilityRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectCommand {
    NewFacility {
        name: String,
    },
    SetGeodeticPosition {
        name: String,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    },
    SetColor {
        name: String,
        color: String,
    },
}

impl fmt::Display for ConnectCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectCommand::NewFacility { name } => write!(f, "New / */Facility {name}"),
            ConnectCommand::SetGeodeticPosition {
                name,
                latitude_deg,
                longitude_deg,
                altitude_km,
            } => write!(
                f,
                "SetPosition */Facility/{name} Geodetic {latitude_deg} {longitude_deg} {altitude_km:.1}"
            ),
            ConnectCommand::SetColor { name, color } => {
                write!(f, "Graphics */Facility/{name} SetColor {color}")
            }
        }
    }
}

/// Create, position on the ground, and color one facility.
pub fn facility_commands(facility: &FacilityRecord, color: &str) -> [ConnectCommand; 3] {
    [
        ConnectCommand::NewFacility {
            name: facility.name.clone(),
        },
        ConnectCommand::SetGeodeticPosition {
            name: facility.name.clone(),
            latitude_deg: facility.latitude_deg,
            longitude_deg: facility.longitude_deg,
            altitude_km: 0.0,
        },
        ConnectCommand::SetColor {
            name: facility.name.clone(),
            color: color.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_commands_put_latitude_first() {
        let facility = FacilityRecord {
            name: "Fac02".into(),
            longitude_deg: -0.12,
            latitude_deg: 51.5,
        };
        let lines: Vec<String> = facility_commands(&facility, "cyan")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            [
                "New / */Facility Fac02",
                "SetPosition */Facility/Fac02 Geodetic 51.5 -0.12 0.0",
                "Graphics */Facility/Fac02 SetColor cyan",
            ]
        );
    }
}
