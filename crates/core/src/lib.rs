//! Core units, time primitives, and access-interval types shared across the outage workspace.

pub mod interval;
pub mod position;
pub mod table;
pub mod time;

pub use interval::AccessInterval;
pub use position::LlaSample;
pub use table::{AccessTable, TableError};
pub use time::{TimeWindow, Timestamp, TimestampError};

/// Physical and conversion constants.
pub mod constants {
    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Feet per international nautical mile.
    pub const FEET_PER_NAUTICAL_MILE: f64 = 1_852.0 / 0.3048;
    /// Feet per kilometre.
    pub const FEET_PER_KM: f64 = 1_000.0 / 0.3048;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{FEET_PER_KM, FEET_PER_NAUTICAL_MILE};

    /// Convert feet to nautical miles.
    #[inline]
    pub fn ft_to_nm(v: f64) -> f64 {
        v / FEET_PER_NAUTICAL_MILE
    }

    /// Convert nautical miles to feet.
    #[inline]
    pub fn nm_to_ft(v: f64) -> f64 {
        v * FEET_PER_NAUTICAL_MILE
    }

    /// Convert kilometres to feet.
    #[inline]
    pub fn km_to_ft(v: f64) -> f64 {
        v * FEET_PER_KM
    }

}
