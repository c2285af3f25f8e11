use std::fs;
use std::io::Write;
use std::path::PathBuf;

use access_outage::export::summary::{OutageSummary, SkippedEntry, SummaryEntry};
use access_outage::export::{access, outage, summary, writer_for_path};
use access_outage::importer::RecordedAccess;
use access_outage::mission::{BatchPolicy, FACILITY_CHAIN, facility_outages};
use clap::Parser;
use log::info;
use outage_cli::{DEFAULT_START, DEFAULT_STOP, init_logging, resolve_window};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Longest coverage outage per facility of a facility-to-sensor chain"
)]
struct Cli {
    /// Directory of recorded access tables
    #[arg(long)]
    access_dir: PathBuf,

    /// Chain whose per-facility access is analysed
    #[arg(long, default_value = FACILITY_CHAIN)]
    chain: String,

    /// Directory receiving FacNNAccess.txt, MaxOutageData.txt and the JSON summary
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Scenario manifest providing the analysis window
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window start (UTCG) when no manifest is given
    #[arg(long, default_value = DEFAULT_START)]
    start: String,

    /// Window stop (UTCG) when no manifest is given
    #[arg(long, default_value = DEFAULT_STOP)]
    stop: String,

    /// Log and skip facilities with malformed or misordered intervals
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let (_, window) = resolve_window(cli.config.as_deref(), &cli.start, &cli.stop)?;
    let service = RecordedAccess::new(&cli.access_dir)?;
    let policy = if cli.skip_invalid {
        BatchPolicy::Skip
    } else {
        BatchPolicy::Abort
    };

    let batch = facility_outages(&service, &cli.chain, &window, policy)?;

    fs::create_dir_all(&cli.output_dir)?;
    for report in &batch.outages {
        let path = access::facility_path(&cli.output_dir, &report.label);
        access::write_columns_to_path(&path, &report.table, &access::FACILITY_COLUMNS)?;
    }
    for skipped in &batch.skipped {
        let path = access::facility_path(&cli.output_dir, &skipped.label);
        access::write_columns_to_path(&path, &skipped.table, &access::FACILITY_COLUMNS)?;
    }

    let mut rows = writer_for_path(&cli.output_dir.join(outage::FILE))?;
    outage::write_rows(
        rows.as_mut(),
        batch
            .outages
            .iter()
            .map(|report| (report.label.as_str(), &report.result)),
    )?;
    rows.flush()?;

    for report in &batch.outages {
        println!("{}: {}", report.label, report.result);
    }
    for skipped in &batch.skipped {
        println!("{}: skipped ({})", skipped.label, skipped.error);
    }

    let sidecar = OutageSummary {
        source: cli.chain.clone(),
        window_start: window.start.to_string(),
        window_stop: window.stop.to_string(),
        entries: batch
            .outages
            .iter()
            .map(|report| SummaryEntry::new(&report.label, &report.result))
            .collect(),
        skipped: batch
            .skipped
            .iter()
            .map(|skipped| SkippedEntry {
                label: skipped.label.clone(),
                reason: skipped.error.to_string(),
            })
            .collect(),
    };
    if let Some(worst) = sidecar.worst() {
        info!("worst facility outage: {}", worst.label);
    }
    summary::write_json(&cli.output_dir.join("outage_summary.json"), &sidecar)?;
    Ok(())
}
