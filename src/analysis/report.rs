//! Rendering of finished [`RunCounters`].
//!
//! A [`Report`] is a read-only snapshot: per-file summaries, grand totals,
//! and, when anything was kept, the ranked IP, status and URI tables. It
//! renders as text via [`fmt::Display`] and exports as JSON or CSV.

use crate::analysis::counters::{FileSummary, LineCounts, RunCounters};
use crate::error::FileError;
use crate::utils::time::format_timestamp;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::io::Write;

pub const DEFAULT_TOP_N: usize = 5;

/// One ranked `(value, count)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedValue {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeptSpan {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub files: Vec<FileSummary>,
    pub totals: LineCounts,
    pub top_n: usize,
    pub kept_span: Option<KeptSpan>,
    pub top_ips: Vec<RankedValue>,
    /// Every distinct status code, untruncated.
    pub status_codes: Vec<RankedValue>,
    pub top_uris: Vec<RankedValue>,
}

/// Clamp a signed `--top` value; zero or negative shows nothing.
pub fn clamp_top_n(top: i64) -> usize {
    usize::try_from(top).unwrap_or(0)
}

fn ranked(pairs: Vec<(String, usize)>) -> Vec<RankedValue> {
    pairs
        .into_iter()
        .map(|(value, count)| RankedValue { value, count })
        .collect()
}

#[derive(Serialize)]
struct CsvRow<'a> {
    section: &'a str,
    value: &'a str,
    count: usize,
}

impl Report {
    pub fn build(counters: &RunCounters, top_n: usize) -> Self {
        let kept_span = match (counters.earliest_kept, counters.latest_kept) {
            (Some(earliest), Some(latest)) => Some(KeptSpan { earliest, latest }),
            _ => None,
        };

        Self {
            files: counters.files.clone(),
            totals: counters.totals,
            top_n,
            kept_span,
            top_ips: ranked(counters.ip_frequency.most_common(Some(top_n))),
            status_codes: ranked(counters.status_frequency.most_common(None)),
            top_uris: ranked(counters.uri_frequency.most_common(Some(top_n))),
        }
    }

    pub const fn has_data(&self) -> bool {
        self.totals.kept > 0
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("Failed to write JSON report")
    }

    /// Rows of `section,value,count`. Totals come first, then the rankings.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        let totals = [
            ("lines_seen", self.totals.lines_seen),
            ("kept", self.totals.kept),
            ("filtered_by_date", self.totals.filtered_by_date),
            ("unparsed", self.totals.unparsed()),
        ];
        for (value, count) in totals {
            writer
                .serialize(CsvRow {
                    section: "total",
                    value,
                    count,
                })
                .context("Failed to write CSV record")?;
        }

        let sections = [
            ("ip", &self.top_ips),
            ("status", &self.status_codes),
            ("uri", &self.top_uris),
        ];
        for (section, rows) in sections {
            for row in rows {
                writer
                    .serialize(CsvRow {
                        section,
                        value: &row.value,
                        count: row.count,
                    })
                    .context("Failed to write CSV record")?;
            }
        }
        writer.flush().context("Failed to flush CSV writer")?;
        Ok(())
    }
}

fn write_file_section(f: &mut fmt::Formatter<'_>, file: &FileSummary) -> fmt::Result {
    if let Some(FileError::Unavailable { path }) = &file.error {
        return writeln!(f, "Error: Log file not found at '{path}'");
    }
    writeln!(f, "\n--- Analyzing log file: {} ---", file.path)?;
    if let Some(err) = &file.error {
        // Partial counts still reach the overall summary.
        return writeln!(f, "An {err}");
    }
    write_finished(f, file)
}

fn write_finished(f: &mut fmt::Formatter<'_>, file: &FileSummary) -> fmt::Result {
    writeln!(
        f,
        "Finished {}: Parsed&Kept {}, FilteredOutByDate {}, Unparsable/NoTimestamp {}",
        file.path,
        file.counts.kept,
        file.counts.filtered_by_date,
        file.counts.unparsed()
    )
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            write_file_section(f, file)?;
        }

        writeln!(f, "\n--- Overall Summary ---")?;
        writeln!(
            f,
            "Total lines processed from all files: {}",
            self.totals.lines_seen
        )?;
        writeln!(
            f,
            "Total lines successfully parsed and kept for analysis: {}",
            self.totals.kept
        )?;
        if self.totals.filtered_by_date > 0 {
            writeln!(
                f,
                "Total lines filtered out by date range: {}",
                self.totals.filtered_by_date
            )?;
        }
        if self.totals.unparsed() > 0 {
            writeln!(
                f,
                "Total lines failed to parse or had missing timestamps: {}",
                self.totals.unparsed()
            )?;
        }

        if !self.has_data() {
            writeln!(
                f,
                "\nNo data available for analysis after parsing and filtering."
            )?;
            return Ok(());
        }

        writeln!(f, "\n--- Combined Log Analysis Report (Filtered) ---")?;
        writeln!(f, "Total Requests in selected range: {}", self.totals.kept)?;
        if let Some(span) = &self.kept_span {
            writeln!(
                f,
                "Time span: {} to {}",
                format_timestamp(&span.earliest),
                format_timestamp(&span.latest)
            )?;
        }

        writeln!(f, "\nTop {} IP Addresses:", self.top_n)?;
        for row in &self.top_ips {
            writeln!(f, "  {}: {} requests", row.value, row.count)?;
        }

        writeln!(f, "\nRequests by Status Code:")?;
        for row in &self.status_codes {
            writeln!(f, "  Status {}: {} requests", row.value, row.count)?;
        }

        writeln!(f, "\nTop {} Requested URIs:", self.top_n)?;
        for row in &self.top_uris {
            writeln!(f, "  {}: {} requests", row.value, row.count)?;
        }

        Ok(())
    }
}
