//! Report writers for access tables, outage rows, position tables, and JSON summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use outage_core::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot export table: {0}")]
    Table(#[from] TableError),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod access {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use outage_core::AccessTable;

    use super::{ExportError, writer_for_path};

    /// Access number, start, stop, and duration of an object-access table.
    pub const FACILITY_COLUMNS: [usize; 4] = [0, 2, 3, 4];
    /// Leading four columns of a complete chain access table.
    pub const CHAIN_COLUMNS: [usize; 4] = [0, 1, 2, 3];

    pub const CHAIN_FILE: &str = "AircraftAccess.txt";

    /// `<dir>/<label>Access.txt`
    pub fn facility_path(dir: &Path, label: &str) -> PathBuf {
        dir.join(format!("{label}Access.txt"))
    }

    /// Write the chosen columns of a table, header first.
    pub fn write_columns(
        writer: &mut dyn Write,
        table: &AccessTable,
        columns: &[usize],
    ) -> Result<(), ExportError> {
        let selected = table.select(columns)?;
        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        out.write_record(selected.columns())?;
        for row in selected.rows() {
            out.write_record(row)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn write_columns_to_path(
        path: &Path,
        table: &AccessTable,
        columns: &[usize],
    ) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        write_columns(writer.as_mut(), table, columns)?;
        writer.flush()?;
        Ok(())
    }
}

pub mod outage {
    use std::io::Write;

    use outage_analysis::OutageResult;

    use super::ExportError;

    pub const FILE: &str = "MaxOutageData.txt";

    /// One `label,seconds,gap start,gap end` line; `label,NA,NA,NA` for continuous coverage.
    ///
    /// Gap bounds keep nanosecond digits so sub-millisecond gaps stay distinct.
    pub fn write_row(
        writer: &mut dyn Write,
        label: &str,
        result: &OutageResult,
    ) -> Result<(), ExportError> {
        match result {
            OutageResult::Continuous => writeln!(writer, "{label},NA,NA,NA")?,
            OutageResult::Gap(gap) => writeln!(
                writer,
                "{label},{},{},{}",
                gap.duration_seconds,
                gap.gap_start.to_utcg_nanos(),
                gap.gap_end.to_utcg_nanos()
            )?,
        }
        Ok(())
    }

    /// Write every row of a batch; the writer is expected to be freshly truncated.
    pub fn write_rows<'a, I>(writer: &mut dyn Write, rows: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = (&'a str, &'a OutageResult)>,
    {
        for (label, result) in rows {
            write_row(writer, label, result)?;
        }
        Ok(())
    }
}

pub mod position {
    use std::io::Write;

    use outage_core::LlaSample;
    use outage_core::units::km_to_ft;

    use super::ExportError;

    const HEADER: [&str; 4] = ["Time (UTCG)", "Lat (deg)", "Lon (deg)", "Alt (ft)"];

    /// Appended to the object name: `TestAircraft_LLA_ft.txt`.
    pub const FILE_SUFFIX: &str = "_LLA_ft.txt";

    /// LLA samples with altitude in whole feet.
    pub fn write_lla_feet(writer: &mut dyn Write, samples: &[LlaSample]) -> Result<(), ExportError> {
        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        out.write_record(HEADER)?;
        for sample in samples {
            out.write_record([
                sample.time.to_string(),
                sample.latitude_deg.to_string(),
                sample.longitude_deg.to_string(),
                format!("{:.0}", km_to_ft(sample.altitude_km)),
            ])?;
        }
        out.flush()?;
        Ok(())
    }
}

pub mod summary {
    use std::io::Write;
    use std::path::Path;

    use outage_analysis::OutageResult;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    /// One analysed access list.
    #[derive(Debug, Clone, Serialize)]
    pub struct SummaryEntry {
        pub label: String,
        pub continuous: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gap_index: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub duration_s: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gap_start: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gap_end: Option<String>,
    }

    impl SummaryEntry {
        pub fn new(label: &str, result: &OutageResult) -> Self {
            let gap = result.outage();
            Self {
                label: label.to_string(),
                continuous: result.is_continuous(),
                gap_index: gap.map(|g| g.index),
                duration_s: gap.map(|g| g.duration_seconds),
                gap_start: gap.map(|g| g.gap_start.to_utcg_nanos()),
                gap_end: gap.map(|g| g.gap_end.to_utcg_nanos()),
            }
        }
    }

    /// An access list that could not be analysed.
    #[derive(Debug, Clone, Serialize)]
    pub struct SkippedEntry {
        pub label: String,
        pub reason: String,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct OutageSummary {
        pub source: String,
        pub window_start: String,
        pub window_stop: String,
        pub entries: Vec<SummaryEntry>,
        pub skipped: Vec<SkippedEntry>,
    }

    impl OutageSummary {
        /// Entry with the longest gap across the summary, first one on ties.
        pub fn worst(&self) -> Option<&SummaryEntry> {
            self.entries
                .iter()
                .filter(|entry| entry.duration_s.is_some())
                .fold(None, |best: Option<&SummaryEntry>, entry| match best {
                    Some(b) if b.duration_s >= entry.duration_s => Some(b),
                    _ => Some(entry),
                })
        }
    }

    pub fn write_json(path: &Path, summary: &OutageSummary) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
