//! Longest-outage detection over ordered access intervals.
//!
//! An outage is the gap between the stop of one access interval and the start
//! of the next. [`max_outage`] scans every adjacent pair and reports the
//! longest one; lists with fewer than two intervals are continuous coverage.

use std::fmt;

use outage_core::{AccessInterval, Timestamp, TimestampError};
use thiserror::Error;

/// Why an interval list violates the sorted, non-overlapping invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingFault {
    /// A single interval stops before it starts.
    Inverted { start: Timestamp, stop: Timestamp },
    /// The next interval starts before this one stops.
    Overlap { stop: Timestamp, next_start: Timestamp },
}

impl fmt::Display for OrderingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingFault::Inverted { start, stop } => {
                write!(f, "stops at {stop} before it starts at {start}")
            }
            OrderingFault::Overlap { stop, next_start } => write!(
                f,
                "stops at {stop} after the next interval starts at {next_start}"
            ),
        }
    }
}

/// Errors surfaced while analyzing an interval list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutageError {
    #[error("malformed timestamp in interval {index}: {source}")]
    MalformedTimestamp {
        index: usize,
        #[source]
        source: TimestampError,
    },
    #[error("interval {index} {fault}")]
    InvalidIntervalOrdering { index: usize, fault: OrderingFault },
}

/// A gap between interval `index` and interval `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outage {
    /// Index of the interval whose stop opens the gap.
    pub index: usize,
    pub duration_seconds: f64,
    pub gap_start: Timestamp,
    pub gap_end: Timestamp,
}

impl fmt::Display for Outage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seconds from {} until {}",
            self.duration_seconds, self.gap_start, self.gap_end
        )
    }
}

/// Coverage verdict for one interval list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutageResult {
    /// Fewer than two intervals; no gap exists.
    Continuous,
    /// The longest gap between consecutive intervals.
    Gap(Outage),
}

impl OutageResult {
    pub fn is_continuous(&self) -> bool {
        matches!(self, OutageResult::Continuous)
    }

    pub fn outage(&self) -> Option<&Outage> {
        match self {
            OutageResult::Continuous => None,
            OutageResult::Gap(outage) => Some(outage),
        }
    }
}

impl fmt::Display for OutageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutageResult::Continuous => write!(f, "No Outage"),
            OutageResult::Gap(outage) => write!(f, "{outage}"),
        }
    }
}

/// Every adjacent gap in the list, in order.
///
/// Fails on the first interval whose stop precedes its start, or on the first
/// pair whose next start precedes the current stop. Zero-length gaps are valid.
pub fn gaps(intervals: &[AccessInterval]) -> Result<Vec<Outage>, OutageError> {
    for (index, interval) in intervals.iter().enumerate() {
        if interval.stop < interval.start {
            return Err(OutageError::InvalidIntervalOrdering {
                index,
                fault: OrderingFault::Inverted {
                    start: interval.start,
                    stop: interval.stop,
                },
            });
        }
    }

    intervals
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (current, next) = (&pair[0], &pair[1]);
            if next.start < current.stop {
                return Err(OutageError::InvalidIntervalOrdering {
                    index,
                    fault: OrderingFault::Overlap {
                        stop: current.stop,
                        next_start: next.start,
                    },
                });
            }
            Ok(Outage {
                index,
                duration_seconds: current.stop.seconds_until(&next.start),
                gap_start: current.stop,
                gap_end: next.start,
            })
        })
        .collect()
}

/// Longest outage of an ordered interval list.
///
/// Zero or one interval is [`OutageResult::Continuous`]. Ties keep the earliest gap.
pub fn max_outage(intervals: &[AccessInterval]) -> Result<OutageResult, OutageError> {
    if intervals.len() < 2 {
        return Ok(OutageResult::Continuous);
    }

    let mut longest: Option<Outage> = None;
    for outage in gaps(intervals)? {
        match longest {
            Some(best) if outage.duration_seconds <= best.duration_seconds => {}
            _ => longest = Some(outage),
        }
    }

    Ok(longest.map_or(OutageResult::Continuous, OutageResult::Gap))
}

/// Parse start/stop text pairs, then run [`max_outage`].
///
/// Every timestamp is parsed, so a malformed entry fails even when the list
/// is too short to have a gap.
pub fn max_outage_text<S: AsRef<str>>(rows: &[(S, S)]) -> Result<OutageResult, OutageError> {
    let intervals = parse_intervals(rows)?;
    max_outage(&intervals)
}

/// Parse start/stop text pairs into intervals, tagging failures with their row.
pub fn parse_intervals<S: AsRef<str>>(
    rows: &[(S, S)],
) -> Result<Vec<AccessInterval>, OutageError> {
    rows.iter()
        .enumerate()
        .map(|(index, (start, stop))| {
            AccessInterval::parse(start.as_ref(), stop.as_ref())
                .map_err(|source| OutageError::MalformedTimestamp { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_and_single_lists_are_continuous() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(max_outage_text(&empty).unwrap(), OutageResult::Continuous);

        let single = [("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000")];
        assert_eq!(max_outage_text(&single).unwrap(), OutageResult::Continuous);
    }

    #[test]
    fn two_intervals_report_the_gap_between_them() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jun 2016 16:00:00.000", "01 Jun 2016 16:05:00.000"),
        ];
        let result = max_outage_text(&list).unwrap();
        let outage = result.outage().expect("gap expected");
        assert_relative_eq!(outage.duration_seconds, 3_000.0);
        assert_eq!(outage.index, 0);
        assert_eq!(outage.gap_start.to_string(), "1 Jun 2016 15:10:00.000");
        assert_eq!(outage.gap_end.to_string(), "1 Jun 2016 16:00:00.000");
    }

    #[test]
    fn larger_later_gap_wins() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jun 2016 15:10:50.000", "01 Jun 2016 15:20:00.000"),
            ("01 Jun 2016 16:10:00.000", "01 Jun 2016 16:15:00.000"),
        ];
        let outage = *max_outage_text(&list).unwrap().outage().unwrap();
        assert_eq!(outage.index, 1);
        assert_relative_eq!(outage.duration_seconds, 3_000.0);
        assert_eq!(outage.gap_start.to_string(), "1 Jun 2016 15:20:00.000");
    }

    #[test]
    fn ties_keep_the_earliest_gap() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:01:00.000"),
            ("01 Jun 2016 15:02:40.000", "01 Jun 2016 15:03:40.000"),
            ("01 Jun 2016 15:05:20.000", "01 Jun 2016 15:06:20.000"),
        ];
        let outage = *max_outage_text(&list).unwrap().outage().unwrap();
        assert_eq!(outage.index, 0);
        assert_relative_eq!(outage.duration_seconds, 100.0);
    }

    #[test]
    fn fractional_seconds_survive() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:00:10.125"),
            ("01 Jun 2016 15:00:12.500", "01 Jun 2016 15:00:20.000"),
        ];
        let outage = *max_outage_text(&list).unwrap().outage().unwrap();
        assert_relative_eq!(outage.duration_seconds, 2.375);
    }

    #[test]
    fn touching_intervals_give_zero_gap() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jun 2016 15:10:00.000", "01 Jun 2016 15:20:00.000"),
        ];
        let outage = *max_outage_text(&list).unwrap().outage().unwrap();
        assert_eq!(outage.duration_seconds, 0.0);
    }

    #[test]
    fn overlap_is_an_ordering_error() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jun 2016 15:05:00.000", "01 Jun 2016 15:20:00.000"),
        ];
        let err = max_outage_text(&list).unwrap_err();
        assert!(matches!(
            err,
            OutageError::InvalidIntervalOrdering {
                index: 0,
                fault: OrderingFault::Overlap { .. }
            }
        ));
    }

    #[test]
    fn inverted_interval_is_an_ordering_error() {
        let list = [
            ("01 Jun 2016 15:10:00.000", "01 Jun 2016 15:00:00.000"),
            ("01 Jun 2016 16:00:00.000", "01 Jun 2016 16:10:00.000"),
        ];
        let err = max_outage_text(&list).unwrap_err();
        assert!(matches!(
            err,
            OutageError::InvalidIntervalOrdering {
                index: 0,
                fault: OrderingFault::Inverted { .. }
            }
        ));
    }

    #[test]
    fn malformed_timestamps_are_reported_with_row() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jux 2016 16:00:00.000", "01 Jun 2016 16:05:00.000"),
        ];
        assert!(matches!(
            max_outage_text(&list),
            Err(OutageError::MalformedTimestamp { index: 1, .. })
        ));

        let no_fraction = [("01 Jun 2016 15:00:00", "01 Jun 2016 15:10:00.000")];
        assert!(matches!(
            max_outage_text(&no_fraction),
            Err(OutageError::MalformedTimestamp { index: 0, .. })
        ));
    }

    #[test]
    fn leap_second_is_malformed_not_clamped() {
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:00:60.000"),
            ("01 Jun 2016 15:01:00.000", "01 Jun 2016 15:02:00.000"),
        ];
        assert!(matches!(
            max_outage_text(&list),
            Err(OutageError::MalformedTimestamp { index: 0, .. })
        ));
    }

    #[test]
    fn loose_layouts_are_malformed() {
        for bad in ["01Jun2016 15:00:00.000", "01 Jun 16 15:00:00.000"] {
            let list = [
                ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
                (bad, "01 Jun 2016 16:05:00.000"),
            ];
            assert!(
                matches!(
                    max_outage_text(&list),
                    Err(OutageError::MalformedTimestamp { index: 1, .. })
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn gaps_lists_every_adjacent_pair() {
        let intervals = parse_intervals(&[
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jun 2016 15:11:00.000", "01 Jun 2016 15:20:00.000"),
            ("01 Jun 2016 15:30:00.000", "01 Jun 2016 15:40:00.000"),
        ])
        .unwrap();
        let all = gaps(&intervals).unwrap();
        assert_eq!(all.len(), 2);
        assert_relative_eq!(all[0].duration_seconds, 60.0);
        assert_relative_eq!(all[1].duration_seconds, 600.0);
    }

    #[test]
    fn display_follows_report_wording() {
        assert_eq!(OutageResult::Continuous.to_string(), "No Outage");
        let list = [
            ("01 Jun 2016 15:00:00.000", "01 Jun 2016 15:10:00.000"),
            ("01 Jun 2016 16:00:00.000", "01 Jun 2016 16:05:00.000"),
        ];
        assert_eq!(
            max_outage_text(&list).unwrap().to_string(),
            "3000 seconds from 1 Jun 2016 15:10:00.000 until 1 Jun 2016 16:00:00.000"
        );
    }
}
