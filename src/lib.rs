//! Access outage analysis for satellite coverage scenarios.
//!
//! The workspace crates are re-exported here so front-ends depend on a single
//! package: interval primitives in [`core`], the gap search in [`analysis`],
//! manifests in [`config`], scenario and report workflows in [`mission`],
//! recorded-table replay in [`importer`], and report writers in [`export`].

pub use outage_analysis as analysis;
pub use outage_config as config;
pub use outage_core as core;
pub use outage_export as export;
pub use outage_importer as importer;
pub use outage_mission as mission;

pub use outage_analysis::{OutageError, OutageResult, max_outage};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
