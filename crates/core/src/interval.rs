use std::fmt;

use crate::time::{Timestamp, TimestampError};

/// One continuous period during which an observer can see a target.
///
/// Ordering (`start <= stop`, sorted, non-overlapping lists) is checked by the
/// analysis layer, not at construction, so a raw service row can always be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessInterval {
    pub start: Timestamp,
    pub stop: Timestamp,
}

impl AccessInterval {
    pub fn new(start: Timestamp, stop: Timestamp) -> Self {
        Self { start, stop }
    }

    /// Parse an interval from the service's start/stop UTCG strings.
    pub fn parse(start: &str, stop: &str) -> Result<Self, TimestampError> {
        Ok(Self {
            start: Timestamp::parse(start)?,
            stop: Timestamp::parse(stop)?,
        })
    }

    /// Interval length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.start.seconds_until(&self.stop)
    }
}

impl fmt::Display for AccessInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} until {}", self.start, self.stop)
    }
}
