//! Data structures representing one access log line.
//!
//! A [`LogEntry`] only exists when the whole line matched the combined log
//! format. Its `instant` is independently optional: the bracketed timestamp
//! text is always kept, even when it could not be normalised.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The closed set of request methods the grammar accepts.
///
/// Anything else (`PATCH`, `TRACE`, a malformed verb) rejects the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(format!("unsupported request method: {other}")),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed access log line.
///
/// # Fields
///
/// - `ip_address`: dotted-quad text, syntactic only (`999.999.999.999` is fine)
/// - `identity`: raw identity token, `-` when absent
/// - `raw_timestamp`: text between the first `[` `]` pair
/// - `instant`: UTC instant, `None` when `raw_timestamp` did not parse
/// - `status_code` / `bytes_sent`: kept as text, never used arithmetically
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub ip_address: String,
    pub identity: String,
    pub raw_timestamp: String,
    pub instant: Option<DateTime<Utc>>,
    pub method: HttpMethod,
    pub uri: String,
    pub protocol: String,
    pub status_code: String,
    /// Digits, or `-` for an unknown size.
    pub bytes_sent: String,
    pub referer: String,
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_round_trips_through_text() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ] {
            assert_eq!(method.as_str().parse::<HttpMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_method_rejects_outside_enumeration() {
        assert!("PATCH".parse::<HttpMethod>().is_err());
        assert!("TRACE".parse::<HttpMethod>().is_err());
        assert!("get".parse::<HttpMethod>().is_err());
    }
}
