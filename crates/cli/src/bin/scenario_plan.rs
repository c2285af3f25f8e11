use std::io::Write;
use std::path::PathBuf;

use access_outage::config::{load_facilities, load_flight_plan, load_scenario};
use access_outage::export::writer_for_path;
use access_outage::importer::RecordedAccess;
use access_outage::mission::recorder::ScenarioRecorder;
use access_outage::mission::route::route_start;
use access_outage::mission::{build_aircraft_chain, build_scenario, first_access_start};
use clap::Parser;
use log::{info, warn};
use outage_cli::init_logging;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Print the object build sequence of a scenario manifest"
)]
struct Cli {
    /// Scenario manifest (TOML or YAML)
    #[arg(long)]
    config: PathBuf,

    /// Plan destination (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Recorded access used to time the aircraft start from the first constrained access
    #[arg(long)]
    access_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let scenario = load_scenario(&cli.config)?;
    let facilities = load_facilities(&scenario.facilities_file)?;

    let mut recorder = ScenarioRecorder::new();
    let built = build_scenario(&mut recorder, &scenario, &facilities)?;
    info!(
        "planned {} facilities and {} satellites",
        built.facility_paths.len(),
        built.satellites.len()
    );

    if let Some(aircraft) = &scenario.aircraft {
        let waypoints = load_flight_plan(&aircraft.flight_plan_file)?;
        let anchor = match (&cli.access_dir, &scenario.facility_constraint) {
            (Some(dir), Some(constraint)) => {
                let service = RecordedAccess::new(dir)?;
                let from = format!("Facility/{}", constraint.facility);
                first_access_start(&service, &from, &constraint.target, &built.window)?
            }
            _ => {
                warn!("no recorded constrained access; timing the aircraft from the scenario start");
                built.window.start
            }
        };
        let start = route_start(anchor, aircraft.start_offset_min);
        info!("aircraft {} starts at {start}", aircraft.name);
        build_aircraft_chain(
            &mut recorder,
            aircraft,
            &waypoints,
            start,
            &built.sensor_paths,
        )?;
    }

    let mut writer = writer_for_path(&cli.output)?;
    for line in recorder.lines() {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
