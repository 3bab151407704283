//! Terminal progress for the scan and copy phases

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::time::Duration;

const SCAN_TEMPLATE: &str = "{spinner:.cyan} {prefix} {pos}";
const COPY_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.green/white} {pos}/{len} {wide_msg}";

/// Draws a spinner while scanning and a per-file bar while copying
///
/// The copy bar only exists once [`start_copy`](Self::start_copy) has been
/// called, so dry runs and empty plans never show one.
pub struct ProgressReporter {
    visible: bool,
    scan: ProgressBar,
    copy: Option<ProgressBar>,
    bytes: u64,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let scan = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SCAN_TEMPLATE) {
            scan.set_style(style);
        }
        scan.enable_steady_tick(Duration::from_millis(100));

        Self {
            visible: true,
            scan,
            copy: None,
            bytes: 0,
        }
    }

    /// A reporter that tracks counts but draws nothing
    pub fn hidden() -> Self {
        Self {
            visible: false,
            scan: ProgressBar::hidden(),
            copy: None,
            bytes: 0,
        }
    }

    pub fn start_scan(&self, label: &str) {
        self.scan.set_prefix(label.to_string());
        self.scan.set_position(0);
    }

    pub fn update_scan(&self, label: &str, files: u64) {
        self.scan.set_prefix(label.to_string());
        self.scan.set_position(files);
    }

    pub fn finish_scan(&self, label: &str, files: usize) {
        self.update_scan(label, files as u64);
    }

    /// Remove the spinner; the caller prints the scan totals itself.
    pub fn end_scans(&self) {
        self.scan.finish_and_clear();
    }

    pub fn start_copy(&mut self, total_files: u64) {
        let bar = if self.visible {
            let bar = ProgressBar::new(total_files);
            if let Ok(style) = ProgressStyle::with_template(COPY_TEMPLATE) {
                bar.set_style(style.progress_chars("##-"));
            }
            bar
        } else {
            let bar = ProgressBar::hidden();
            bar.set_length(total_files);
            bar
        };
        self.bytes = 0;
        self.copy = Some(bar);
    }

    pub fn set_current_file(&self, source: &str) {
        if let Some(bar) = &self.copy {
            bar.set_message(source.to_string());
        }
    }

    /// Print a line without tearing the active bar.
    pub fn println(&self, line: impl AsRef<str>) {
        match &self.copy {
            Some(bar) => bar.println(line.as_ref()),
            None => self.scan.println(line.as_ref()),
        }
    }

    pub fn complete_copy_file(&mut self, bytes: u64) {
        self.bytes = self.bytes.saturating_add(bytes);
        if let Some(bar) = &self.copy {
            bar.inc(1);
            bar.set_message(HumanBytes(self.bytes).to_string());
        }
    }

    pub fn copy_error(&self, source: &str, err: &str) {
        self.println(format!("failed {source}: {err}"));
    }

    pub fn finish_copy(&self, copied: usize, bytes: u64) {
        if let Some(bar) = &self.copy {
            bar.finish_with_message(format!("{copied} files, {}", HumanBytes(bytes)));
        }
    }

    /// Freeze the bar where it stopped.
    pub fn abandon_copy(&self) {
        if let Some(bar) = &self.copy {
            bar.abandon();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy_bar(reporter: &ProgressReporter) -> &ProgressBar {
        reporter.copy.as_ref().expect("copy bar started")
    }

    #[test]
    fn test_scan_position_tracks_file_count() {
        let reporter = ProgressReporter::hidden();
        reporter.start_scan("Getting source files...");
        reporter.update_scan("Getting source files...", 7);

        assert_eq!(reporter.scan.position(), 7);
        assert_eq!(reporter.scan.prefix(), "Getting source files...");

        reporter.finish_scan("Found source files:", 9);
        assert_eq!(reporter.scan.position(), 9);
        assert_eq!(reporter.scan.prefix(), "Found source files:");
    }

    #[test]
    fn test_no_copy_bar_until_copy_starts() {
        let mut reporter = ProgressReporter::hidden();
        reporter.set_current_file("ui/panel.ts");
        reporter.complete_copy_file(10);
        reporter.finish_copy(0, 0);

        assert!(reporter.copy.is_none());
    }

    #[test]
    fn test_copy_bar_counts_files_and_bytes() {
        let mut reporter = ProgressReporter::hidden();
        reporter.start_copy(2);
        reporter.set_current_file("ui/panel.ts");
        assert_eq!(copy_bar(&reporter).message(), "ui/panel.ts");

        reporter.complete_copy_file(128);
        reporter.complete_copy_file(256);

        let bar = copy_bar(&reporter);
        assert_eq!(bar.position(), 2);
        assert_eq!(bar.length(), Some(2));
        assert_eq!(reporter.bytes, 384);
        assert_eq!(bar.message(), HumanBytes(384).to_string());
    }

    #[test]
    fn test_restarting_copy_resets_bytes() {
        let mut reporter = ProgressReporter::hidden();
        reporter.start_copy(1);
        reporter.complete_copy_file(50);
        reporter.start_copy(3);

        assert_eq!(reporter.bytes, 0);
        assert_eq!(copy_bar(&reporter).position(), 0);
        assert_eq!(copy_bar(&reporter).length(), Some(3));
    }

    #[test]
    fn test_finish_copy_marks_bar_finished() {
        let mut reporter = ProgressReporter::hidden();
        reporter.start_copy(1);
        reporter.complete_copy_file(1);
        reporter.finish_copy(1, 1);

        assert!(copy_bar(&reporter).is_finished());
        assert!(copy_bar(&reporter).message().starts_with("1 files"));
    }
}
