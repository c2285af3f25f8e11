//! UTCG timestamps as emitted by the simulation service (`"1 Jun 2016 15:00:00.000"`).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use thiserror::Error;

use crate::constants::SECONDS_PER_MINUTE;

/// Date and time-of-day portion of a UTCG string; the fractional seconds are handled separately.
const UTCG_BASE_FORMAT: &str = "%d %b %Y %H:%M:%S";
/// Display format, millisecond precision like the service's default UTCG unit.
const UTCG_DISPLAY_FORMAT: &str = "%-d %b %Y %H:%M:%S%.3f";
/// Report format, keeping every digit the service can emit.
const UTCG_NANOS_FORMAT: &str = "%-d %b %Y %H:%M:%S%.9f";
/// The service reports at most nanosecond resolution.
const MAX_FRACTION_DIGITS: usize = 9;

/// Errors raised while parsing UTCG timestamps or building windows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp `{text}` has no fractional seconds field")]
    MissingFraction { text: String },
    #[error("timestamp `{text}` has an invalid fractional seconds field")]
    InvalidFraction { text: String },
    #[error("timestamp `{text}` does not match `DD Mon YYYY HH:MM:SS.fff`: {reason}")]
    Pattern { text: String, reason: String },
    #[error("time window stop `{stop}` precedes start `{start}`")]
    InvertedWindow { start: Timestamp, stop: Timestamp },
}

/// A UTCG instant with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parse a UTCG string such as `"01 Jun 2016 15:00:00.000"`.
    ///
    /// The fractional seconds field is mandatory and may carry one to nine digits.
    /// Month abbreviations follow English three-letter names.
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        let trimmed = text.trim();
        let (whole, fraction) =
            trimmed
                .rsplit_once('.')
                .ok_or_else(|| TimestampError::MissingFraction {
                    text: text.to_string(),
                })?;

        if fraction.is_empty()
            || fraction.len() > MAX_FRACTION_DIGITS
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(TimestampError::InvalidFraction {
                text: text.to_string(),
            });
        }

        let pattern = |reason: String| TimestampError::Pattern {
            text: text.to_string(),
            reason,
        };
        check_layout(whole).map_err(|reason| pattern(reason.to_string()))?;
        let base = NaiveDateTime::parse_from_str(whole, UTCG_BASE_FORMAT)
            .map_err(|err| pattern(err.to_string()))?;
        // chrono reads second 60 as a leap second; the service never emits one.
        if base.nanosecond() >= 1_000_000_000 {
            return Err(pattern("second must be below 60".to_string()));
        }

        let digits: u32 = fraction
            .parse()
            .map_err(|_| TimestampError::InvalidFraction {
                text: text.to_string(),
            })?;
        let nanos = digits * 10u32.pow((MAX_FRACTION_DIGITS - fraction.len()) as u32);

        base.with_nanosecond(nanos)
            .map(Timestamp)
            .ok_or_else(|| TimestampError::InvalidFraction {
                text: text.to_string(),
            })
    }

    /// Wrap an already-built naive UTC date time.
    pub fn from_naive(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    /// Underlying naive UTC date time.
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Signed number of seconds from `self` until `later`, fractional part preserved.
    pub fn seconds_until(&self, later: &Timestamp) -> f64 {
        let delta = later.0 - self.0;
        match delta.num_nanoseconds() {
            Some(nanos) => nanos as f64 / 1e9,
            None => delta.num_milliseconds() as f64 / 1e3,
        }
    }

    /// Full-resolution UTCG text, e.g. `1 Jun 2016 15:10:00.000400000`.
    pub fn to_utcg_nanos(&self) -> String {
        self.0.format(UTCG_NANOS_FORMAT).to_string()
    }

    /// Shift the timestamp by a (possibly fractional) number of minutes.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        let nanos = (minutes * SECONDS_PER_MINUTE * 1e9).round() as i64;
        Self(self.0 + TimeDelta::nanoseconds(nanos))
    }
}

/// Field widths chrono does not enforce: `D[D] Mon YYYY HH:MM:SS`, single spaces.
fn check_layout(whole: &str) -> Result<(), &'static str> {
    let digits = |field: &str| !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit());
    let fields: Vec<&str> = whole.split(' ').collect();
    let [day, month, year, clock] = fields.as_slice() else {
        return Err("expected day, month, year and time separated by single spaces");
    };
    if day.len() > 2 || !digits(day) {
        return Err("day must have one or two digits");
    }
    if month.len() != 3 || !month.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err("month must be a three-letter abbreviation");
    }
    if year.len() != 4 || !digits(year) {
        return Err("year must have four digits");
    }
    let clock: Vec<&str> = clock.split(':').collect();
    if clock.len() != 3 || clock.iter().any(|part| part.len() != 2 || !digits(part)) {
        return Err("time of day must be HH:MM:SS");
    }
    Ok(())
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(UTCG_DISPLAY_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Scenario analysis window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub stop: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, stop: Timestamp) -> Result<Self, TimestampError> {
        if stop < start {
            return Err(TimestampError::InvertedWindow { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Parse both ends from UTCG strings.
    pub fn parse(start: &str, stop: &str) -> Result<Self, TimestampError> {
        Self::new(Timestamp::parse(start)?, Timestamp::parse(stop)?)
    }

    /// Window length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.start.seconds_until(&self.stop)
    }

    pub fn contains(&self, instant: &Timestamp) -> bool {
        self.start <= *instant && *instant <= self.stop
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_millisecond_and_nanosecond_fractions() {
        let ms = Timestamp::parse("01 Jun 2016 15:00:00.250").unwrap();
        let ns = Timestamp::parse("1 Jun 2016 15:00:00.250000000").unwrap();
        assert_eq!(ms, ns);
        assert_eq!(ms.naive().nanosecond(), 250_000_000);
    }

    #[test]
    fn display_matches_service_format() {
        let ts = Timestamp::parse("01 Jun 2016 15:10:00.000").unwrap();
        assert_eq!(ts.to_string(), "1 Jun 2016 15:10:00.000");
    }

    #[test]
    fn rejects_missing_fraction() {
        let err = Timestamp::parse("01 Jun 2016 15:00:00").unwrap_err();
        assert!(matches!(err, TimestampError::MissingFraction { .. }));
    }

    #[test]
    fn rejects_unknown_month() {
        let err = Timestamp::parse("01 Jux 2016 15:00:00.000").unwrap_err();
        assert!(matches!(err, TimestampError::Pattern { .. }));
    }

    #[test]
    fn rejects_leap_second_instead_of_clamping() {
        let err = Timestamp::parse("01 Jun 2016 15:00:60.000").unwrap_err();
        assert!(matches!(err, TimestampError::Pattern { .. }));
    }

    #[test]
    fn rejects_collapsed_separators_and_short_years() {
        for text in [
            "01Jun2016 15:00:00.000",
            "01 Jun  2016 15:00:00.000",
            "01 Jun 16 15:00:00.000",
            "01 June 2016 15:00:00.000",
            "01 Jun 2016 15:0:00.000",
            "001 Jun 2016 15:00:00.000",
        ] {
            assert!(
                matches!(Timestamp::parse(text), Err(TimestampError::Pattern { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn nanosecond_text_keeps_sub_millisecond_digits() {
        let ts = Timestamp::parse("1 Jun 2016 15:10:00.000400000").unwrap();
        assert_eq!(ts.to_string(), "1 Jun 2016 15:10:00.000");
        assert_eq!(ts.to_utcg_nanos(), "1 Jun 2016 15:10:00.000400000");
    }

    #[test]
    fn rejects_non_digit_fraction() {
        assert!(matches!(
            Timestamp::parse("01 Jun 2016 15:00:00.0a0"),
            Err(TimestampError::InvalidFraction { .. })
        ));
        assert!(matches!(
            Timestamp::parse("01 Jun 2016 15:00:00."),
            Err(TimestampError::InvalidFraction { .. })
        ));
    }

    #[test]
    fn seconds_until_keeps_fraction() {
        let a = Timestamp::parse("01 Jun 2016 15:00:00.000").unwrap();
        let b = Timestamp::parse("01 Jun 2016 15:00:01.500").unwrap();
        assert_relative_eq!(a.seconds_until(&b), 1.5);
        assert_relative_eq!(b.seconds_until(&a), -1.5);
    }

    #[test]
    fn add_minutes_crosses_midnight() {
        let a = Timestamp::parse("01 Jun 2016 23:45:00.000").unwrap();
        assert_eq!(a.add_minutes(30.0).to_string(), "2 Jun 2016 00:15:00.000");
    }

    #[test]
    fn window_rejects_inverted_bounds() {
        let err = TimeWindow::parse("2 Jun 2016 15:00:00.000", "1 Jun 2016 15:00:00.000")
            .unwrap_err();
        assert!(matches!(err, TimestampError::InvertedWindow { .. }));
        let window =
            TimeWindow::parse("1 Jun 2016 15:00:00.000", "2 Jun 2016 15:00:00.000").unwrap();
        assert_relative_eq!(window.duration_seconds(), 86_400.0);
    }
}
