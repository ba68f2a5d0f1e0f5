//! Combined Log Format line parser.
//!
//! The grammar is fixed and anchored at both ends. Every field is mandatory,
//! in this order:
//!
//! ```text
//! <ip> - <identity> [<timestamp>] "<METHOD> <uri> <protocol>" <status> <bytes> "<referer>" "<user_agent>"
//! ```
//!
//! A line either yields a fully populated [`LogEntry`] or is rejected with
//! [`LineRejection::GrammarMismatch`]. There is no partial match.

use crate::access::timestamp::normalize_timestamp;
use crate::access::types::{HttpMethod, LogEntry};
use crate::error::LineRejection;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

// IP - IDENTITY [TIMESTAMP] "METHOD URI PROTOCOL" STATUS BYTES "REFERER" "USER_AGENT"
static RE_COMBINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"\s+-\s+",
        r"([\w.-]+|\S+)",
        r"\s+\[([^\]]+)\]",
        r#"\s+"(GET|POST|PUT|DELETE|HEAD|OPTIONS)"#,
        r#"\s+([^"\s]+)"#,
        r#"\s+(HTTP/\d\.\d)""#,
        r"\s+(\d{3})",
        r"\s+([-\d]+)",
        r#"\s+"([^"]*)""#,
        r#"\s+"([^"]*)"$"#,
    ))
    .expect("combined log format pattern is valid")
});

/// A grammar match together with the outcome of normalising its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub entry: LogEntry,
    /// Mirrors `entry.instant`, keeping the rejection when it is `None`.
    pub timestamp: Result<DateTime<Utc>, LineRejection>,
}

/// Parse one log line (trailing newline already stripped).
///
/// The timestamp is normalised here as well. A timestamp that does not parse
/// leaves `entry.instant` empty but still produces a [`ParsedLine`], with the
/// failure in `timestamp`.
///
/// # Examples
///
/// ```
/// use access_log_analyzer::access::parser::parse_line;
///
/// let line = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326 "-" "Mozilla""#;
/// let parsed = parse_line(line).unwrap();
/// assert_eq!(parsed.entry.uri, "/apache_pb.gif");
/// assert!(parsed.timestamp.is_ok());
/// ```
pub fn parse_line(line: &str) -> Result<ParsedLine, LineRejection> {
    let caps = RE_COMBINED
        .captures(line)
        .ok_or(LineRejection::GrammarMismatch)?;

    let method: HttpMethod = caps[4]
        .parse()
        .map_err(|_| LineRejection::GrammarMismatch)?;
    let raw_timestamp = caps[3].to_string();
    let timestamp = normalize_timestamp(&raw_timestamp);

    let entry = LogEntry {
        ip_address: caps[1].to_string(),
        identity: caps[2].to_string(),
        raw_timestamp,
        instant: timestamp.as_ref().ok().copied(),
        method,
        uri: caps[5].to_string(),
        protocol: caps[6].to_string(),
        status_code: caps[7].to_string(),
        bytes_sent: caps[8].to_string(),
        referer: caps[9].to_string(),
        user_agent: caps[10].to_string(),
    };

    Ok(ParsedLine { entry, timestamp })
}
