use access_outage::config::{load_facilities, load_flight_plan, load_scenario};
use access_outage::core::Timestamp;
use access_outage::mission::recorder::ScenarioRecorder;
use access_outage::mission::route::route_start;
use access_outage::mission::{build_aircraft_chain, build_scenario};
use approx::assert_relative_eq;

#[test]
fn certification_manifest_loads_with_data_files() {
    let scenario = load_scenario("data/scenarios/certification.toml").expect("toml manifest");
    assert_eq!(scenario.name, "IntegrationCertification");
    assert_relative_eq!(scenario.window().unwrap().duration_seconds(), 86_400.0);
    assert!(scenario.facilities_file.is_file());
    assert_eq!(scenario.constellation.planes * scenario.constellation.sats_per_plane, 32);

    let aircraft = scenario.aircraft.as_ref().expect("aircraft section");
    assert!(aircraft.flight_plan_file.is_file());
    assert_eq!(aircraft.degraded_sensor, "Satellite/Sat11/Sensor/Sensor11");

    let facilities = load_facilities(&scenario.facilities_file).unwrap();
    assert_eq!(facilities.len(), 8);
    let fac02 = facilities.iter().find(|f| f.name == "Fac02").unwrap();
    assert_relative_eq!(fac02.longitude_deg, -147.52);
    assert_relative_eq!(fac02.latitude_deg, 64.98);

    let plan = load_flight_plan(&aircraft.flight_plan_file).unwrap();
    assert_eq!(plan.len(), 5);
    assert_relative_eq!(plan[0].altitude_ft, 1_500.0);
    assert_relative_eq!(plan[4].speed_kts, 430.0);
}

#[test]
fn yaml_manifest_falls_back_to_defaults() {
    let scenario = load_scenario("data/scenarios/certification.yaml").expect("yaml manifest");
    assert_eq!(scenario.facility_color, "cyan");
    assert_eq!(scenario.constellation.raan_span_deg, 180);
    assert!(scenario.constellation.stagger);
    assert_relative_eq!(scenario.sensor.angular_resolution_deg, 2.0);
    assert!(scenario.facility_constraint.is_none());
    assert!(scenario.aircraft.is_none());
}

#[test]
fn full_build_plan_covers_every_object() {
    let scenario = load_scenario("data/scenarios/certification.toml").unwrap();
    let facilities = load_facilities(&scenario.facilities_file).unwrap();
    let mut recorder = ScenarioRecorder::new();
    let built = build_scenario(&mut recorder, &scenario, &facilities).unwrap();

    assert_eq!(built.satellites.len(), 32);
    assert_eq!(built.sensor_paths.len(), 32);
    // scenario, 3 commands per facility, satellites, sensors, 2 constellations, chain, constraint
    assert_eq!(recorder.lines().len(), 1 + 8 * 3 + 32 + 32 + 2 + 1 + 1);

    let lines = recorder.lines();
    assert!(lines.contains(&"SetPosition */Facility/Fac02 Geodetic 64.98 -147.52 0.0".to_string()));
    assert!(lines.contains(&"Graphics */Facility/Fac08 SetColor cyan".to_string()));
    assert!(lines.contains(
        &"Sensor Satellite/Sat48/Sensor/Sensor48 SimpleCone 62.5 deg resolution 2 deg".to_string()
    ));
    let sat11 = lines
        .iter()
        .find(|l| l.starts_with("Satellite Sat11 "))
        .unwrap();
    assert!(sat11.ends_with("raan=0 deg ta=22.5 deg"), "{sat11}");

    let aircraft = scenario.aircraft.as_ref().unwrap();
    let waypoints = load_flight_plan(&aircraft.flight_plan_file).unwrap();
    let first_access = Timestamp::parse("1 Jun 2016 15:42:10.500000000").unwrap();
    let route = build_aircraft_chain(
        &mut recorder,
        aircraft,
        &waypoints,
        route_start(first_access, aircraft.start_offset_min),
        &built.sensor_paths,
    )
    .unwrap();
    assert_eq!(route.points.len(), 5);
    assert_relative_eq!(route.points[1].altitude_nm, 25_000.0 * 0.3048 / 1_852.0, epsilon = 1e-12);

    let degraded = recorder
        .lines()
        .iter()
        .find(|l| l.starts_with("Constellation DegradedSensorConstellation"))
        .unwrap();
    assert_eq!(degraded.matches("/Sensor/").count(), 31);
    assert!(!degraded.contains("Sensor11,") && !degraded.ends_with("Sensor11]"));
}
