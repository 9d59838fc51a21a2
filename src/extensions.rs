//! Small helpers for timestamps, durations and string normalization.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::time::Duration;

/// Convert Unix seconds to a UTC timestamp.
///
/// Returns `None` when the value is outside the range chrono can represent.
pub fn from_unix_time(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Convert a UTC timestamp to Unix seconds, dropping sub-second precision.
pub fn to_unix_time(time: &DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Render a duration as words, e.g. `"1 day 3 hours 12 milliseconds"`.
///
/// Zero components are left out. Durations shorter than one millisecond are
/// reported as `"1 millisecond"`.
pub fn to_duration_string(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms < 1 {
        return "1 millisecond".to_string();
    }

    let parts = [
        (total_ms / 86_400_000, "day"),
        (total_ms / 3_600_000 % 24, "hour"),
        (total_ms / 60_000 % 60, "minute"),
        (total_ms / 1_000 % 60, "second"),
        (total_ms % 1_000, "millisecond"),
    ];

    parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| {
            let plural = if *value > 1 { "s" } else { "" };
            format!("{value} {unit}{plural}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `value` with `prefix` prepended, unless it already starts with it.
pub fn ensure_starts_with<'a>(value: &'a str, prefix: &str) -> Cow<'a, str> {
    if value.starts_with(prefix) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("{prefix}{value}"))
    }
}

/// `value` with `suffix` appended, unless it already ends with it.
pub fn ensure_ends_with<'a>(value: &'a str, suffix: &str) -> Cow<'a, str> {
    if value.ends_with(suffix) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("{value}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_time_round_trip() {
        let time = from_unix_time(1_500_000_000).unwrap();
        assert_eq!(time.to_rfc3339(), "2017-07-14T02:40:00+00:00");
        assert_eq!(to_unix_time(&time), 1_500_000_000);
    }

    #[test]
    fn test_unix_epoch() {
        assert_eq!(from_unix_time(0), Some(DateTime::<Utc>::UNIX_EPOCH));
    }

    #[test]
    fn test_unix_time_out_of_range() {
        assert_eq!(from_unix_time(i64::MAX), None);
    }

    #[test]
    fn test_duration_string() {
        let duration = Duration::from_millis(2 * 86_400_000 + 3_600_000 + 5 * 60_000 + 3_012);
        assert_eq!(
            to_duration_string(duration),
            "2 days 1 hour 5 minutes 3 seconds 12 milliseconds"
        );
    }

    #[test]
    fn test_duration_string_skips_zero_parts() {
        assert_eq!(to_duration_string(Duration::from_secs(60)), "1 minute");
        assert_eq!(to_duration_string(Duration::from_millis(1_001)), "1 second 1 millisecond");
    }

    #[test]
    fn test_duration_string_very_short() {
        assert_eq!(to_duration_string(Duration::ZERO), "1 millisecond");
        assert_eq!(to_duration_string(Duration::from_micros(400)), "1 millisecond");
    }

    #[test]
    fn test_ensure_starts_with() {
        assert_eq!(ensure_starts_with("key", "Bearer "), "Bearer key");
        assert!(matches!(ensure_starts_with("Bearer key", "Bearer "), Cow::Borrowed(_)));
    }

    #[test]
    fn test_ensure_ends_with() {
        assert_eq!(ensure_ends_with("https://api.example.com/v3", "/"), "https://api.example.com/v3/");
        assert_eq!(ensure_ends_with("https://api.example.com/v3/", "/"), "https://api.example.com/v3/");
    }
}
