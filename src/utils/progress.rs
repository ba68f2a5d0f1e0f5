//! Per-file progress display using indicatif
//!
//! Progress is measured in bytes of decoded input, so compressed files
//! show a spinner-style counter instead of a percentage.

use indicatif::{ProgressBar as IndicatifBar, ProgressDrawTarget, ProgressStyle};

/// How often (in lines) the bar position is refreshed.
pub const UPDATE_EVERY_LINES: usize = 10_000;

/// Progress bar for one input file
pub struct FileProgress {
    bar: IndicatifBar,
}

impl FileProgress {
    /// A bar sized to the file length, or a spinner when the size is unknown.
    /// `enabled = false` gives a hidden bar so callers don't branch.
    pub fn new(total_bytes: Option<u64>, label: &str, enabled: bool) -> Self {
        let bar = match total_bytes {
            Some(total) => {
                let bar = IndicatifBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{msg} [{bar:40.cyan/blue}] {percent:>3}% ({bytes}/{total_bytes}) {eta}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█░"),
                );
                bar
            }
            None => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("{msg} {spinner} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        if !enabled {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_message(label.to_string());

        Self { bar }
    }

    pub fn update(&self, bytes_read: u64) {
        match self.bar.length() {
            Some(len) => self.bar.set_position(bytes_read.min(len)),
            None => self.bar.set_position(bytes_read),
        }
    }

    /// Clear the bar once the file is done; the summary line replaces it.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_caps_at_length() {
        let progress = FileProgress::new(Some(100), "test", false);
        progress.update(250);
        assert_eq!(progress.bar.position(), 100);
        progress.finish();
    }

    #[test]
    fn test_spinner_tracks_bytes() {
        let progress = FileProgress::new(None, "test", false);
        progress.update(42);
        assert_eq!(progress.bar.position(), 42);
    }
}
