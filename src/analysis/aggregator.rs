//! Streaming, single-pass aggregation over one or more log files.
//!
//! Files are read one at a time, lines one at a time, in the order given.
//! Each non-blank line is classified in this order:
//!
//! 1. grammar match, else [`Classification::GrammarMismatch`]
//! 2. timestamp parse, else [`Classification::TimestampFailure`]
//! 3. date range, else [`Classification::FilteredByDate`]
//! 4. [`Classification::Kept`], which also updates the frequency maps
//!
//! A missing or unreadable file is recorded on its [`FileSummary`] and the
//! run moves on to the next file.

use crate::access::parser::parse_line;
use crate::analysis::counters::{Classification, FileSummary, LineCounts, RunCounters};
use crate::analysis::range::RangeFilter;
use crate::error::{FileError, LineRejection};
use crate::utils::progress::{FileProgress, UPDATE_EVERY_LINES};
use crate::utils::reader::open_file;
use anyhow::Context;
use std::io::{BufRead, BufReader};
use tracing::{debug, error, warn};

/// Owns the run's [`RunCounters`] while files are fed through it.
#[derive(Debug)]
pub struct Aggregator {
    range: RangeFilter,
    counters: RunCounters,
    show_progress: bool,
}

impl Aggregator {
    pub fn new(range: RangeFilter) -> Self {
        Self {
            range,
            counters: RunCounters::new(),
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn show_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub const fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Hand the counters back; the aggregator is done.
    pub fn finish(self) -> RunCounters {
        self.counters
    }

    /// Classify one raw line and fold it into the totals and `file_counts`.
    pub fn process_line(&mut self, line: &str, file_counts: &mut LineCounts) -> Classification {
        let classification = self.classify(line);
        self.counters.totals.record(classification);
        file_counts.record(classification);
        classification
    }

    fn classify(&mut self, line: &str) -> Classification {
        let line = line.trim();
        if line.is_empty() {
            return Classification::Blank;
        }

        let parsed = match parse_line(line) {
            Ok(parsed) => parsed,
            Err(_) => return Classification::GrammarMismatch,
        };

        let instant = match parsed.timestamp {
            Ok(instant) => instant,
            Err(e @ LineRejection::TimestampParseFailure { .. }) => {
                warn!("{e}");
                return Classification::TimestampFailure;
            }
            Err(LineRejection::GrammarMismatch) => return Classification::GrammarMismatch,
        };

        if !self.range.contains(instant) {
            return Classification::FilteredByDate;
        }

        self.counters.record_kept(&parsed.entry, instant);
        Classification::Kept
    }

    /// Feed every line of `reader` through [`Self::process_line`].
    ///
    /// Invalid UTF-8 is decoded lossily. A read error stops this reader;
    /// lines already classified keep their contribution.
    pub fn process_reader<R: BufRead>(
        &mut self,
        mut reader: R,
        file_counts: &mut LineCounts,
        progress: &FileProgress,
    ) -> anyhow::Result<()> {
        let mut buf = Vec::with_capacity(512);
        let mut bytes_read: u64 = 0;
        let mut line_number = 0usize;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Failed to read line {}", line_number + 1))?;
            if n == 0 {
                break;
            }
            line_number += 1;
            bytes_read += n as u64;

            let line = String::from_utf8_lossy(&buf);
            self.process_line(&line, file_counts);

            if line_number % UPDATE_EVERY_LINES == 0 {
                progress.update(bytes_read);
            }
        }

        progress.update(bytes_read);
        Ok(())
    }

    /// Process one file, recording its summary. Never fails the run.
    pub fn process_file(&mut self, path: &str) -> Option<&FileSummary> {
        debug!(path, "analyzing log file");

        match open_file(path) {
            Ok(file) => {
                let size = std::fs::metadata(path).ok().map(|m| m.len());
                let compressed = path.ends_with(".gz") || path.ends_with(".zst");
                let progress = FileProgress::new(
                    size.filter(|_| !compressed),
                    path,
                    self.show_progress,
                );

                self.process_stream(path, BufReader::new(file), &progress);
                progress.finish();
            }
            Err(err) => {
                match &err {
                    FileError::Unavailable { .. } => warn!("{err}"),
                    FileError::Fault { .. } => error!("{err}"),
                }
                let mut summary = FileSummary::new(path);
                summary.error = Some(err);
                self.counters.files.push(summary);
            }
        }

        self.counters.files.last()
    }

    /// Read an already opened input named `path` and record its summary.
    ///
    /// A read error becomes [`FileError::Fault`] on the summary; the partial
    /// counts stay in both the summary and the run totals.
    pub fn process_stream<R: BufRead>(
        &mut self,
        path: &str,
        reader: R,
        progress: &FileProgress,
    ) -> Option<&FileSummary> {
        let mut summary = FileSummary::new(path);

        let result = self.process_reader(reader, &mut summary.counts, progress);
        if let Err(err) = result.with_context(|| format!("Failed to process file: {path}")) {
            error!("{err:?}");
            summary.error = Some(FileError::Fault {
                path: path.to_string(),
                message: format!("{err:#}"),
            });
        }

        self.counters.files.push(summary);
        self.counters.files.last()
    }

    /// Process every file in order and return the finished counters.
    pub fn process_files(mut self, paths: &[String]) -> RunCounters {
        for path in paths {
            self.process_file(path);
        }
        self.finish()
    }
}

/// Run the whole pipeline over `paths` with a fresh set of counters.
pub fn aggregate(paths: &[String], range: RangeFilter) -> RunCounters {
    Aggregator::new(range).process_files(paths)
}
