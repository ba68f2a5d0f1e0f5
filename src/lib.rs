//! # Access Log Analyzer
//!
//! Command-line tools for summarising web server access logs written in the
//! Common/Combined Log Format used by Apache httpd, nginx and most proxies.
//!
//! ## Overview
//!
//! Each line is matched against a fixed, anchored grammar, its timestamp is
//! normalised to UTC, an optional inclusive date window is applied, and the
//! surviving entries feed three frequency counters: client IP, status code
//! and request URI. Processing is a single streaming pass per file, so very
//! large logs never need to fit in memory.
//!
//! ## Features
//!
//! - **Strict grammar** with a closed request-method set (`GET`, `POST`, `PUT`,
//!   `DELETE`, `HEAD`, `OPTIONS`)
//! - **Timezone-aware filtering**: logs from servers in different offsets are
//!   compared on one UTC timeline
//! - **Compressed file support** for `.gz` and `.zst`
//! - **Resilient**: a missing or broken file is reported and skipped
//! - **Export** of the summary as JSON or CSV
//! - **Shell completion** for bash, zsh, fish, powershell, and elvish
//!
//! ## Architecture
//!
//! - [`access`] - Line grammar, [`LogEntry`](access::types::LogEntry), timestamp normalisation
//! - [`analysis`] - Range filter, run counters, aggregator, report
//! - [`commands`] - Command implementations
//! - [`utils`] - File reader, progress display, bound parsing
//! - [`error`] - Error taxonomy
//!
//! ## Example Usage
//!
//! ```bash
//! access-log analyze /var/log/nginx/access.log*
//! access-log analyze access.log -n 10 --start-date 2021-01-02
//! access-log analyze access.log --output summary.csv
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use access_log_analyzer::analysis::aggregator::Aggregator;
//! use access_log_analyzer::analysis::counters::LineCounts;
//! use access_log_analyzer::analysis::range::RangeFilter;
//!
//! let mut aggregator = Aggregator::new(RangeFilter::default());
//! let mut counts = LineCounts::default();
//! aggregator.process_line(
//!     r#"10.0.0.1 - - [01/Jan/2021:00:00:00 +0000] "GET / HTTP/1.1" 200 512 "-" "curl""#,
//!     &mut counts,
//! );
//! let counters = aggregator.finish();
//! assert_eq!(counters.ip_frequency.get("10.0.0.1"), 1);
//! ```

pub mod access;
pub mod analysis;
pub mod commands;
pub mod error;
pub mod utils;
