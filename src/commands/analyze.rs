//! Access log summary command.
//!
//! Parses one or more Common/Combined Log Format files, optionally limits
//! them to a date window, and prints the top client IPs, the status code
//! distribution and the top requested URIs.
//!
//! # Usage
//!
//! ```bash
//! # Single file
//! access-log analyze access.log
//!
//! # Rotated logs, compressed or not, top 10
//! access-log analyze access.log access.log.1 access.log.2.gz -n 10
//!
//! # One day, inclusive at both ends
//! access-log analyze access.log --start-date 2021-01-02 --end-date 2021-01-02T23:59:59
//!
//! # Also export the report
//! access-log analyze access.log --output summary.json
//! access-log analyze access.log --output summary.csv
//! ```
//!
//! Invalid `--start-date`/`--end-date` values are reported and ignored.
//! Missing or unreadable files are reported and skipped.

use crate::analysis::aggregator::Aggregator;
use crate::analysis::range::RangeFilter;
use crate::analysis::report::{clamp_top_n, Report, DEFAULT_TOP_N};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Resolved settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub top_n: usize,
    pub range: RangeFilter,
    pub show_progress: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            range: RangeFilter::default(),
            show_progress: false,
        }
    }
}

impl AnalysisConfig {
    /// Build from raw CLI values; bad bounds degrade to "no bound".
    pub fn from_args(top: i64, start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            top_n: clamp_top_n(top),
            range: RangeFilter::from_args(start_date, end_date),
            show_progress: false,
        }
    }
}

/// Export formats for `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Explicit `--format` wins, otherwise the output file extension decides.
    pub fn resolve(format: Option<&str>, output_path: &str) -> Result<Self> {
        match format {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some(other) => bail!("Invalid format '{}'. Use 'json' or 'csv'", other),
            None => {
                if Path::new(output_path)
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                {
                    Ok(Self::Csv)
                } else {
                    Ok(Self::Json)
                }
            }
        }
    }
}

/// Run the pipeline and build the report without printing anything.
pub fn analyze(log_files: &[String], config: &AnalysisConfig) -> Report {
    let counters = Aggregator::new(config.range)
        .show_progress(config.show_progress)
        .process_files(log_files);
    Report::build(&counters, config.top_n)
}

pub fn export(report: &Report, output_path: &str, format: ExportFormat) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => report.write_json(&mut writer)?,
        ExportFormat::Csv => report.write_csv(&mut writer)?,
    }
    writer.flush().context("Failed to flush report")?;
    Ok(())
}

pub fn run(
    log_files: &[String],
    config: &AnalysisConfig,
    output: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    // Format errors surface before any input is read.
    let export_format = output
        .map(|path| ExportFormat::resolve(format, path))
        .transpose()?;

    let report = analyze(log_files, config);
    print!("{report}");

    if let (Some(path), Some(export_format)) = (output, export_format) {
        export(&report, path, export_format)?;
        eprintln!("Report exported to {}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::resolve(None, "out.CSV").unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::resolve(None, "out.json").unwrap(),
            ExportFormat::Json
        );
        assert_eq!(ExportFormat::resolve(None, "out").unwrap(), ExportFormat::Json);
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(
            ExportFormat::resolve(Some("csv"), "out.json").unwrap(),
            ExportFormat::Csv
        );
        let err = ExportFormat::resolve(Some("xml"), "out.xml").unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_config_from_args() {
        let config = AnalysisConfig::from_args(-1, Some("2021-01-02"), Some("bad"));
        assert_eq!(config.top_n, 0);
        assert!(config.range.start.is_some());
        assert!(config.range.end.is_none());
    }

    #[test]
    fn test_export_write_failure_is_reported() {
        // Every write to /dev/full fails with ENOSPC.
        if !Path::new("/dev/full").exists() {
            return;
        }
        let report = analyze(&[], &AnalysisConfig::default());
        for format in [ExportFormat::Json, ExportFormat::Csv] {
            assert!(export(&report, "/dev/full", format).is_err());
        }
    }

    #[test]
    fn test_export_json_is_complete() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let report = analyze(&[], &AnalysisConfig::default());

        export(&report, path.to_str().unwrap(), ExportFormat::Json).unwrap();

        let written = std::fs::read(&path).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(value["totals"]["lines_seen"], 0);
    }
}
