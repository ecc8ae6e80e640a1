//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use phylokit_engine::CycleReport;
use std::time::Duration;

/// Progress reporter for line processing
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Start a spinner counting processed lines
    pub fn init_lines(&mut self) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {pos} lines {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Show which file is being read
    pub fn file_started(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(filename.to_string());
        }
    }

    /// Count the lines of a finished cycle
    pub fn cycle_completed(&self, report: &CycleReport) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(report.lines_read() as u64);
        }
    }

    /// Lines counted so far
    pub fn position(&self) -> u64 {
        self.progress_bar.as_ref().map_or(0, |pb| pb.position())
    }

    /// Finish progress reporting
    pub fn finish(&self, files: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("from {files} file(s)"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(first_line: usize, last_line: usize) -> CycleReport {
        CycleReport {
            cycle: 1,
            first_line,
            last_line,
            sub_chunks: 1,
            lines_written: 0,
        }
    }

    #[test]
    fn test_quiet_reporter_is_inert() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_lines();
        reporter.cycle_completed(&report(1, 10));
        assert_eq!(reporter.position(), 0);
        reporter.finish(1);
    }

    #[test]
    fn test_counts_cycle_lines() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_lines();
        reporter.file_started("a.txt");
        reporter.cycle_completed(&report(1, 10));
        reporter.cycle_completed(&report(11, 13));
        assert_eq!(reporter.position(), 13);
        reporter.finish(1);
    }
}
