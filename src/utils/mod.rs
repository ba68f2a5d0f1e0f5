//! Utility functions and helpers.
//!
//! - [`progress`] - Per-file progress display
//! - [`reader`] - File reader with automatic decompression
//! - [`time`] - Range bound parsing and timestamp display
//!
//! # Examples
//!
//! ```
//! use access_log_analyzer::utils::time::parse_bound;
//!
//! let start = parse_bound("2021-01-02").unwrap();
//! println!("Filtering from: {}", start);
//! ```

pub mod progress;
pub mod reader;
pub mod time;
