//! Time utilities: the canonical `YYYY-MM-DD HH:MM:SS` timestamp, elapsed
//! durations and decimal hours.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};

/// Storage and input format for every timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a wall-clock timestamp in the canonical format.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|e| {
        AppError::Validation(format!(
            "'{}' is not a valid timestamp ({}), expected YYYY-MM-DD HH:MM:SS",
            s, e
        ))
    })
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local wall-clock time, truncated to whole seconds.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Decimal hours of a duration (`seconds / 3600`); negative for inverted intervals.
pub fn hours_of(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 / 3600.0
}

/// Format a duration as `HH:MM:SS` (hours are not wrapped at 24).
pub fn format_elapsed(delta: TimeDelta) -> String {
    let secs = delta.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s % 3600) / 60, s % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_timestamps() {
        let dt = parse_timestamp("2024-01-01 09:00:00").unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-01 09:00:00");
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in ["2024-01-01", "2024-01-01T09:00:00", "09:00:00", "", "2024-13-01 09:00:00"] {
            assert!(
                matches!(parse_timestamp(bad), Err(AppError::Validation(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(format_elapsed(TimeDelta::seconds(3_725)), "01:02:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(-60)), "-00:01:00");
        assert_eq!(format_elapsed(TimeDelta::hours(27)), "27:00:00");
    }
}
