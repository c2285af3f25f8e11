use std::fs;
use std::io::Write;
use std::path::PathBuf;

use access_outage::export::summary::{OutageSummary, SummaryEntry};
use access_outage::export::{access, position, summary, writer_for_path};
use access_outage::importer::RecordedAccess;
use access_outage::mission::{AIRCRAFT_CHAIN, aircraft_positions, chain_outage};
use clap::Parser;
use log::info;
use outage_cli::{DEFAULT_START, DEFAULT_STOP, init_logging, resolve_window};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Longest coverage outage of a chain's complete access"
)]
struct Cli {
    /// Directory of recorded access tables
    #[arg(long)]
    access_dir: PathBuf,

    /// Chain whose complete access is analysed
    #[arg(long, default_value = AIRCRAFT_CHAIN)]
    chain: String,

    /// Directory receiving AircraftAccess.txt, the LLA table and the JSON summary
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Scenario manifest providing the window and the aircraft whose LLA is exported
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window start (UTCG) when no manifest is given
    #[arg(long, default_value = DEFAULT_START)]
    start: String,

    /// Window stop (UTCG) when no manifest is given
    #[arg(long, default_value = DEFAULT_STOP)]
    stop: String,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let (scenario, window) = resolve_window(cli.config.as_deref(), &cli.start, &cli.stop)?;
    let service = RecordedAccess::new(&cli.access_dir)?;

    let report = chain_outage(&service, &cli.chain, &window)?;
    fs::create_dir_all(&cli.output_dir)?;
    access::write_columns_to_path(
        &cli.output_dir.join(access::CHAIN_FILE),
        &report.table,
        &access::CHAIN_COLUMNS,
    )?;
    println!("{}: {}", report.label, report.result);

    if let Some(aircraft) = scenario.as_ref().and_then(|s| s.aircraft.as_ref()) {
        let samples = aircraft_positions(&service, aircraft, &window)?;
        let path = cli.output_dir.join(format!("{}{}", aircraft.name, position::FILE_SUFFIX));
        let mut writer = writer_for_path(&path)?;
        position::write_lla_feet(writer.as_mut(), &samples)?;
        writer.flush()?;
        info!("wrote {} LLA samples to {}", samples.len(), path.display());
    }

    let sidecar = OutageSummary {
        source: cli.chain.clone(),
        window_start: window.start.to_string(),
        window_stop: window.stop.to_string(),
        entries: vec![SummaryEntry::new(&report.label, &report.result)],
        skipped: Vec::new(),
    };
    summary::write_json(&cli.output_dir.join("chain_summary.json"), &sidecar)?;
    Ok(())
}
