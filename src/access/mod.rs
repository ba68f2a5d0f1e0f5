//! Access log line parsing.
//!
//! - [`types`] - [`LogEntry`](types::LogEntry) and the request method enumeration
//! - [`parser`] - Combined Log Format grammar
//! - [`timestamp`] - Offset-aware timestamp normalisation to UTC

pub mod parser;
pub mod timestamp;
pub mod types;
