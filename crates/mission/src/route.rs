use outage_config::WaypointRecord;
use outage_core::Timestamp;
use outage_core::units::ft_to_nm;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("a great-arc route needs at least two waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("waypoint {index} has non-positive speed {speed_kts} kts")]
    NonPositiveSpeed { index: usize, speed_kts: f64 },
    #[error("waypoint {index} latitude {latitude_deg} deg outside -90..=90")]
    Latitude { index: usize, latitude_deg: f64 },
}

/// Waypoint in the units the route propagator expects (altitude MSL in nm, speed in kts).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_nm: f64,
    pub speed_kts: f64,
    pub turn_radius_nm: f64,
}

/// Great-arc route with time derived from waypoint speeds.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftRoute {
    pub start: Timestamp,
    pub points: Vec<RoutePoint>,
}

/// Route start: `minutes` after the first constrained access begins.
pub fn route_start(first_access: Timestamp, minutes: f64) -> Timestamp {
    first_access.add_minutes(minutes)
}

/// Convert a flight plan into a route, converting altitude from feet to nautical miles.
pub fn plan_route(
    waypoints: &[WaypointRecord],
    start: Timestamp,
    turn_radius_nm: f64,
) -> Result<AircraftRoute, RouteError> {
    if waypoints.len() < 2 {
        return Err(RouteError::TooFewWaypoints(waypoints.len()));
    }

    let points = waypoints
        .iter()
        .enumerate()
        .map(|(index, wp)| {
            if wp.speed_kts <= 0.0 {
                return Err(RouteError::NonPositiveSpeed {
                    index,
                    speed_kts: wp.speed_kts,
                });
            }
            if !(-90.0..=90.0).contains(&wp.latitude_deg) {
                return Err(RouteError::Latitude {
                    index,
                    latitude_deg: wp.latitude_deg,
                });
            }
            Ok(RoutePoint {
                latitude_deg: wp.latitude_deg,
                longitude_deg: wp.longitude_deg,
                altitude_nm: ft_to_nm(wp.altitude_ft),
                speed_kts: wp.speed_kts,
                turn_radius_nm,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AircraftRoute { start, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn waypoint(lat: f64, alt_ft: f64, speed: f64) -> WaypointRecord {
        WaypointRecord {
            latitude_deg: lat,
            longitude_deg: 103.0,
            altitude_ft: alt_ft,
            speed_kts: speed,
        }
    }

    #[test]
    fn altitude_is_converted_to_nautical_miles() {
        let start = Timestamp::parse("1 Jun 2016 16:00:00.000").unwrap();
        let route = plan_route(
            &[waypoint(1.0, 6_076.115_485_564_304, 250.0), waypoint(2.0, 0.0, 250.0)],
            start,
            1.8,
        )
        .unwrap();
        assert_relative_eq!(route.points[0].altitude_nm, 1.0, epsilon = 1e-12);
        assert_relative_eq!(route.points[1].turn_radius_nm, 1.8);
        assert_eq!(route.start, start);
    }

    #[test]
    fn invalid_waypoints_are_rejected() {
        let start = Timestamp::parse("1 Jun 2016 16:00:00.000").unwrap();
        assert_eq!(
            plan_route(&[waypoint(1.0, 0.0, 250.0)], start, 1.8).unwrap_err(),
            RouteError::TooFewWaypoints(1)
        );
        assert!(matches!(
            plan_route(&[waypoint(1.0, 0.0, 250.0), waypoint(2.0, 0.0, 0.0)], start, 1.8),
            Err(RouteError::NonPositiveSpeed { index: 1, .. })
        ));
        assert!(matches!(
            plan_route(&[waypoint(91.0, 0.0, 250.0), waypoint(2.0, 0.0, 9.0)], start, 1.8),
            Err(RouteError::Latitude { index: 0, .. })
        ));
    }

    #[test]
    fn route_starts_after_offset() {
        let first = Timestamp::parse("1 Jun 2016 15:42:10.500").unwrap();
        assert_eq!(route_start(first, 30.0).to_string(), "1 Jun 2016 16:12:10.500");
    }
}
