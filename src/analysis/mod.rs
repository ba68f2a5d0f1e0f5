//! Filtering, aggregation and reporting.
//!
//! - [`range`] - Inclusive date window over UTC instants
//! - [`counters`] - Bucket counts and frequency maps owned by one run
//! - [`aggregator`] - Single-pass file loop that fills the counters
//! - [`report`] - Ranked snapshot of the counters, as text, JSON or CSV

pub mod aggregator;
pub mod counters;
pub mod range;
pub mod report;
