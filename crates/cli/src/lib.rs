//! Shared plumbing for the outage binaries.

use std::env::var;
use std::path::Path;

use access_outage::config::{ScenarioConfig, load_scenario};
use access_outage::core::TimeWindow;

/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "OUTAGE_LOG";

/// Window used when neither a manifest nor explicit bounds are given.
pub const DEFAULT_START: &str = "1 Jun 2016 15:00:00.000";
pub const DEFAULT_STOP: &str = "2 Jun 2016 15:00:00.000";

/// Initialise `pretty_env_logger` from [`LOG_VAR`], defaulting to `info`.
pub fn init_logging() {
    let filters = var(LOG_VAR).unwrap_or_else(|_| "info".to_string());
    if pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .try_init()
        .is_err()
    {
        eprintln!("could not init logger");
    }
}

/// Analysis window from a scenario manifest when given, else from explicit bounds.
///
/// The loaded manifest is handed back so callers can read the rest of it.
pub fn resolve_window(
    config: Option<&Path>,
    start: &str,
    stop: &str,
) -> anyhow::Result<(Option<ScenarioConfig>, TimeWindow)> {
    match config {
        Some(path) => {
            let scenario = load_scenario(path)?;
            let window = scenario.window()?;
            Ok((Some(scenario), window))
        }
        None => Ok((None, TimeWindow::parse(start, stop)?)),
    }
}
