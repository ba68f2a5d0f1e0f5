use crate::error::BoundError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::warn;

const BOUND_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const BOUND_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a range bound given as `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`.
///
/// Bounds carry no zone and are read as UTC. A date-only bound is midnight.
pub fn parse_bound(s: &str) -> Result<DateTime<Utc>, BoundError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, BOUND_DATETIME_FORMAT) {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, BOUND_DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| BoundError::Invalid(s.to_string()))
}

/// Resolve an optional bound argument, degrading bad input to "no bound".
pub fn resolve_bound(arg: Option<&str>) -> Option<DateTime<Utc>> {
    let s = arg.filter(|s| !s.is_empty())?;
    match parse_bound(s) {
        Ok(bound) => Some(bound),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

/// Format an instant for display
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
