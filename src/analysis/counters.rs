//! Run-scoped counters.
//!
//! A [`RunCounters`] value is created empty per invocation, mutated once per
//! processed line, and read once all files are consumed. Nothing here is
//! global, so separate runs never interfere.

use crate::access::types::LogEntry;
use crate::error::FileError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Terminal classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Whitespace-only; counted as seen and nothing else.
    Blank,
    Kept,
    FilteredByDate,
    GrammarMismatch,
    TimestampFailure,
}

/// Line bucket counts, used both per file and for the grand totals.
///
/// Every non-blank line lands in exactly one of the four buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineCounts {
    pub lines_seen: usize,
    pub kept: usize,
    pub filtered_by_date: usize,
    pub unparsed_grammar: usize,
    pub unparsed_timestamp: usize,
}

impl LineCounts {
    pub fn record(&mut self, classification: Classification) {
        self.lines_seen += 1;
        match classification {
            Classification::Blank => {}
            Classification::Kept => self.kept += 1,
            Classification::FilteredByDate => self.filtered_by_date += 1,
            Classification::GrammarMismatch => self.unparsed_grammar += 1,
            Classification::TimestampFailure => self.unparsed_timestamp += 1,
        }
    }

    /// Grammar mismatches plus timestamp failures.
    pub const fn unparsed(&self) -> usize {
        self.unparsed_grammar + self.unparsed_timestamp
    }

    pub const fn classified(&self) -> usize {
        self.kept + self.filtered_by_date + self.unparsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    count: usize,
    first_seen: usize,
}

/// Occurrence counter that remembers first-insertion order so ties rank
/// stably, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyCounter {
    slots: HashMap<String, Slot>,
    total: usize,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: &str) {
        self.total += 1;
        if let Some(slot) = self.slots.get_mut(value) {
            slot.count += 1;
            return;
        }
        let first_seen = self.slots.len();
        self.slots.insert(
            value.to_string(),
            Slot {
                count: 1,
                first_seen,
            },
        );
    }

    pub fn get(&self, value: &str) -> usize {
        self.slots.get(value).map_or(0, |slot| slot.count)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sum of all counts.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Values ranked by descending count, ties by first insertion.
    /// `limit = None` returns every distinct value.
    pub fn most_common(&self, limit: Option<usize>) -> Vec<(String, usize)> {
        let mut ranked: Vec<(&String, &Slot)> = self.slots.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        if let Some(n) = limit {
            ranked.truncate(n);
        }
        ranked
            .into_iter()
            .map(|(value, slot)| (value.clone(), slot.count))
            .collect()
    }
}

/// Outcome of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub counts: LineCounts,
    /// Set when the file was skipped or reading stopped early.
    pub error: Option<FileError>,
}

impl FileSummary {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            counts: LineCounts::default(),
            error: None,
        }
    }
}

/// All state a single run accumulates.
///
/// The frequency maps are global across files and never reset per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub totals: LineCounts,
    pub files: Vec<FileSummary>,
    pub ip_frequency: FrequencyCounter,
    pub status_frequency: FrequencyCounter,
    pub uri_frequency: FrequencyCounter,
    pub earliest_kept: Option<DateTime<Utc>>,
    pub latest_kept: Option<DateTime<Utc>>,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn total_lines_seen(&self) -> usize {
        self.totals.lines_seen
    }

    pub const fn total_kept(&self) -> usize {
        self.totals.kept
    }

    pub const fn total_filtered_by_date(&self) -> usize {
        self.totals.filtered_by_date
    }

    pub const fn total_unparsed(&self) -> usize {
        self.totals.unparsed()
    }

    /// Fold a kept entry into the frequency maps and the kept time span.
    pub fn record_kept(&mut self, entry: &LogEntry, instant: DateTime<Utc>) {
        self.ip_frequency.record(&entry.ip_address);
        self.status_frequency.record(&entry.status_code);
        self.uri_frequency.record(&entry.uri);

        self.earliest_kept = Some(self.earliest_kept.map_or(instant, |t| t.min(instant)));
        self.latest_kept = Some(self.latest_kept.map_or(instant, |t| t.max(instant)));
    }
}
