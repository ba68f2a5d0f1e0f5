//! Normalisation of access log timestamps to UTC.
//!
//! Log lines carry local time plus a numeric offset, for example
//! `10/Oct/2000:13:55:36 -0700`. Converting to UTC up front lets logs from
//! servers in different zones be range-filtered consistently.

use crate::error::LineRejection;
use chrono::{DateTime, Timelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `day/Mon/Year:Hour:Minute:Second ±HHMM`
pub const LOG_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

// chrono alone accepts a glued offset, leading whitespace and a signed year.
static RE_LOG_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/[A-Za-z]{3}/\d{4}:\d{2}:\d{2}:\d{2}\s+[+-]\d{2}:?\d{2}$")
        .expect("log timestamp pattern is valid")
});

fn rejection(raw: &str, reason: impl Into<String>) -> LineRejection {
    LineRejection::TimestampParseFailure {
        raw: raw.to_string(),
        reason: reason.into(),
    }
}

/// Parse a raw bracketed timestamp and convert it to a UTC instant.
///
/// On failure the error carries the offending string so the caller can
/// surface it.
///
/// # Examples
///
/// ```
/// use access_log_analyzer::access::timestamp::normalize_timestamp;
///
/// let instant = normalize_timestamp("10/Oct/2000:13:55:36 -0700").unwrap();
/// assert_eq!(instant.to_rfc3339(), "2000-10-10T20:55:36+00:00");
/// ```
pub fn normalize_timestamp(raw: &str) -> Result<DateTime<Utc>, LineRejection> {
    if !RE_LOG_TIMESTAMP.is_match(raw) {
        return Err(rejection(
            raw,
            format!("does not match format '{LOG_TIMESTAMP_FORMAT}'"),
        ));
    }

    let parsed = DateTime::parse_from_str(raw, LOG_TIMESTAMP_FORMAT)
        .map_err(|e| rejection(raw, e.to_string()))?;

    // chrono encodes `:60` as an extra second of nanoseconds.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(rejection(raw, "second must be in 0..59"));
    }

    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_negative_offset_moves_forward() {
        let instant = normalize_timestamp("10/Oct/2000:13:55:36 -0700").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2000, 10, 10, 20, 55, 36).unwrap());
    }

    #[test]
    fn test_positive_offset_crosses_day_boundary() {
        let instant = normalize_timestamp("01/Jan/2021:01:30:00 +0200").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2020, 12, 31, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_mixed_offsets_same_instant() {
        let a = normalize_timestamp("15/Mar/2024:12:00:00 +0000").unwrap();
        let b = normalize_timestamp("15/Mar/2024:07:00:00 -0500").unwrap();
        let c = normalize_timestamp("15/Mar/2024:17:30:00 +0530").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_failure_carries_raw_text() {
        let err = normalize_timestamp("not-a-date").unwrap_err();
        match err {
            LineRejection::TimestampParseFailure { raw, .. } => assert_eq!(raw, "not-a-date"),
            other => panic!("unexpected rejection: {other:?}"),
        }
    }

    #[test]
    fn test_missing_offset_is_rejected() {
        assert!(normalize_timestamp("10/Oct/2000:13:55:36").is_err());
    }

    #[test]
    fn test_out_of_range_day_is_rejected() {
        assert!(normalize_timestamp("32/Oct/2000:13:55:36 +0000").is_err());
    }

    #[test]
    fn test_offset_without_space_is_rejected() {
        assert!(normalize_timestamp("10/Oct/2000:13:55:36-0700").is_err());
    }

    #[test]
    fn test_leading_space_is_rejected() {
        assert!(normalize_timestamp(" 10/Oct/2000:13:55:36 -0700").is_err());
    }

    #[test]
    fn test_signed_year_is_rejected() {
        assert!(normalize_timestamp("10/Oct/+2000:13:55:36 -0700").is_err());
    }

    #[test]
    fn test_leap_second_is_rejected() {
        let err = normalize_timestamp("31/Dec/2016:23:59:60 +0000").unwrap_err();
        assert_eq!(
            err,
            LineRejection::TimestampParseFailure {
                raw: "31/Dec/2016:23:59:60 +0000".to_string(),
                reason: "second must be in 0..59".to_string(),
            }
        );
    }

    #[test]
    fn test_single_digit_day_accepted() {
        let instant = normalize_timestamp("1/Oct/2000:13:55:36 -0700").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2000, 10, 1, 20, 55, 36).unwrap());
    }
}
