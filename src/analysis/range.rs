//! Inclusive time-range filter over normalised instants.

use crate::utils::time::resolve_bound;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Optional inclusive `[start, end]` window. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl RangeFilter {
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Build from raw `--start-date` / `--end-date` arguments. Unparseable
    /// values are logged and treated as absent.
    pub fn from_args(start: Option<&str>, end: Option<&str>) -> Self {
        Self::new(resolve_bound(start), resolve_bound(end))
    }

    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `instant` falls inside the window, both ends inclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if self.start.is_some_and(|start| instant < start) {
            return false;
        }
        if self.end.is_some_and(|end| instant > end) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_unbounded_accepts_everything() {
        let filter = RangeFilter::default();
        assert!(filter.is_unbounded());
        assert!(filter.contains(at(1970, 1, 1, 0, 0, 0)));
        assert!(filter.contains(at(2999, 12, 31, 23, 59, 59)));
    }

    #[test]
    fn test_lower_bound_only() {
        let filter = RangeFilter::new(Some(at(2021, 1, 2, 0, 0, 0)), None);
        assert!(!filter.contains(at(2021, 1, 1, 23, 59, 59)));
        assert!(filter.contains(at(2021, 1, 2, 0, 0, 0)));
        assert!(filter.contains(at(2030, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_upper_bound_only() {
        let filter = RangeFilter::new(None, Some(at(2021, 1, 2, 0, 0, 0)));
        assert!(filter.contains(at(2000, 1, 1, 0, 0, 0)));
        assert!(filter.contains(at(2021, 1, 2, 0, 0, 0)));
        assert!(!filter.contains(at(2021, 1, 2, 0, 0, 1)));
    }

    #[test]
    fn test_both_bounds_inclusive() {
        let start = at(2021, 1, 1, 0, 0, 0);
        let end = at(2021, 1, 31, 23, 59, 59);
        let filter = RangeFilter::new(Some(start), Some(end));
        assert!(filter.contains(start));
        assert!(filter.contains(end));
        assert!(filter.contains(at(2021, 1, 15, 12, 0, 0)));
        assert!(!filter.contains(at(2020, 12, 31, 23, 59, 59)));
        assert!(!filter.contains(at(2021, 2, 1, 0, 0, 0)));
    }

    #[test]
    fn test_from_args_drops_invalid_bound() {
        let filter = RangeFilter::from_args(Some("garbage"), Some("2021-01-31T23:59:59"));
        assert_eq!(filter.start, None);
        assert_eq!(filter.end, Some(at(2021, 1, 31, 23, 59, 59)));
    }
}
