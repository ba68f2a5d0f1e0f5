//! Command implementations.
//!
//! - [`analyze`] - Summarise access logs: top IPs, status codes and URIs,
//!   with optional date filtering and JSON/CSV export

pub mod analyze;
