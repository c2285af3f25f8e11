//! Recorded access-table replay.
//!
//! Tables exported from the simulation application are read back from a
//! directory so the outage workflows can run without a live session:
//!
//! - `<root>/<chain>/*.txt`: one object-access table per file, in file-name order
//! - `<root>/<chain>.txt`: complete chain access
//! - `<root>/<from>-<to>.txt`: pairwise access
//! - `<root>/<object>_LLA.txt`: time, latitude, longitude, altitude (km) samples
//!
//! Object paths such as `Chain/FacsToSensors` are reduced to their last segment.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use outage_core::{AccessTable, TableError, TimeWindow, Timestamp, TimestampError};
use outage_mission::service::{AccessService, LlaSample, PositionService, ServiceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no recording at {0}")]
    MissingRecording(PathBuf),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed table in {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
    #[error("row {row} of {path}: {reason}")]
    Value {
        path: PathBuf,
        row: usize,
        reason: String,
    },
    #[error("row {row} of {path}: {source}")]
    Time {
        path: PathBuf,
        row: usize,
        #[source]
        source: TimestampError,
    },
}

impl From<ImportError> for ServiceError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::MissingRecording(path) => {
                ServiceError::UnknownObject(path.display().to_string())
            }
            ImportError::Table { path, source } => ServiceError::Table {
                object: path.display().to_string(),
                source,
            },
            other => ServiceError::Backend(Box::new(other)),
        }
    }
}

/// Read a comma-separated access table with a header row.
pub fn read_access_table(path: &Path) -> Result<AccessTable, ImportError> {
    if !path.is_file() {
        return Err(ImportError::MissingRecording(path.to_path_buf()));
    }
    let csv_err = |source: csv::Error| ImportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = AccessTable::new(columns, rows).map_err(|source| ImportError::Table {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} rows from {}", table.row_count(), path.display());
    Ok(table)
}

/// Read an LLA table: time, latitude (deg), longitude (deg), altitude (km) by position.
pub fn read_lla_table(path: &Path) -> Result<Vec<LlaSample>, ImportError> {
    let table = read_access_table(path)?;
    let mut samples = Vec::with_capacity(table.row_count());
    for (row, cells) in table.rows().iter().enumerate() {
        if cells.len() < 4 {
            return Err(ImportError::Value {
                path: path.to_path_buf(),
                row,
                reason: format!("expected 4 columns, found {}", cells.len()),
            });
        }
        let number = |cell: &str| {
            cell.parse::<f64>().map_err(|err| ImportError::Value {
                path: path.to_path_buf(),
                row,
                reason: format!("`{cell}`: {err}"),
            })
        };
        samples.push(LlaSample {
            time: Timestamp::parse(&cells[0]).map_err(|source| ImportError::Time {
                path: path.to_path_buf(),
                row,
                source,
            })?,
            latitude_deg: number(cells[1].as_str())?,
            longitude_deg: number(cells[2].as_str())?,
            altitude_km: number(cells[3].as_str())?,
        });
    }
    Ok(samples)
}

/// Directory-backed client answering access and position queries from recordings.
#[derive(Debug, Clone)]
pub struct RecordedAccess {
    root: PathBuf,
}

impl RecordedAccess {
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self, ImportError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ImportError::MissingRecording(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_tables(&self, chain: &str) -> Result<Vec<AccessTable>, ImportError> {
        let dir = self.root.join(leaf(chain));
        if !dir.is_dir() {
            return Err(ImportError::MissingRecording(dir));
        }
        let mut entries: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map(|ext| ext == "txt").unwrap_or(false))
            .collect();
        entries.sort();
        entries.iter().map(|path| read_access_table(path)).collect()
    }
}

impl AccessService for RecordedAccess {
    fn object_access(
        &self,
        chain: &str,
        _window: &TimeWindow,
    ) -> Result<Vec<AccessTable>, ServiceError> {
        Ok(self.object_tables(chain)?)
    }

    fn complete_access(
        &self,
        chain: &str,
        _window: &TimeWindow,
    ) -> Result<AccessTable, ServiceError> {
        let path = self.root.join(format!("{}.txt", leaf(chain)));
        Ok(read_access_table(&path)?)
    }

    fn pair_access(
        &self,
        from: &str,
        to: &str,
        _window: &TimeWindow,
    ) -> Result<AccessTable, ServiceError> {
        let path = self.root.join(format!("{}-{}.txt", leaf(from), leaf(to)));
        Ok(read_access_table(&path)?)
    }
}

impl PositionService for RecordedAccess {
    /// Recorded samples inside the window; the recording's own step is kept.
    fn lla_state(
        &self,
        object: &str,
        window: &TimeWindow,
        step_s: f64,
    ) -> Result<Vec<LlaSample>, ServiceError> {
        let path = self.root.join(format!("{}_LLA.txt", leaf(object)));
        let samples = read_lla_table(&path)?;
        debug!(
            "replaying {} LLA samples for {object} (requested step {step_s} s)",
            samples.len()
        );
        Ok(samples
            .into_iter()
            .filter(|sample| window.contains(&sample.time))
            .collect())
    }
}

fn leaf(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
