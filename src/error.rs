//! Error taxonomy for access log analysis.
//!
//! Nothing here is fatal to a run.

use serde::Serialize;
use thiserror::Error;

/// Why a single log line was not turned into a kept entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineRejection {
    #[error("line does not match the combined log format")]
    GrammarMismatch,

    #[error("could not parse log timestamp '{raw}': {reason}")]
    TimestampParseFailure { raw: String, reason: String },
}

/// A `--start-date`/`--end-date` value that fits neither accepted layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundError {
    #[error("invalid date format for '{0}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
    Invalid(String),
}

/// Per-file faults, recovered at the file loop.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileError {
    #[error("log file not found at '{path}'")]
    Unavailable { path: String },

    #[error("unexpected error occurred with {path}: {message}")]
    Fault { path: String, message: String },
}
