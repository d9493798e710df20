//! `indicatif`-backed progress display for the CLI's file operations.

use indicatif::{ProgressBar, ProgressStyle};
use mojic::progress::ProgressReporter;

/// Progress display for a batch of files (the `--recursive` walk).
///
/// A single overall bar over file count, mirroring the teacher's
/// `CliProgress`, simplified since there is no per-entry byte progress to
/// report: the engine runs each file's `encode_stream`/`decode_stream` as one
/// synchronous call rather than a chunked one the CLI can poll mid-flight.
pub struct BatchProgress {
    bar: ProgressBar,
    quiet: bool,
}

impl BatchProgress {
    /// Creates a new batch progress display over `total_files`.
    pub fn new(total_files: u64, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total_files);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {wide_msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        };
        Self { bar, quiet }
    }

    /// Finishes the display.
    pub fn finish(&self) {
        if !self.quiet {
            self.bar.finish_and_clear();
        }
    }
}

impl ProgressReporter for BatchProgress {
    fn on_entry_start(&mut self, path: &str, _size: u64) {
        if !self.quiet {
            self.bar.set_message(path.to_string());
        }
    }

    fn on_entry_complete(&mut self, _path: &str, _success: bool) {
        self.bar.inc(1);
    }

    fn on_warning(&mut self, message: &str) {
        if !self.quiet {
            self.bar.println(format!("warning: {message}"));
        }
    }
}

/// Spinner for a single-file operation.
pub struct FileSpinner {
    bar: ProgressBar,
}

impl FileSpinner {
    /// Creates a new spinner, immediately visible unless `quiet`.
    pub fn new(message: &str, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };
        Self { bar }
    }

    /// Finishes the spinner with a terminal message.
    pub fn finish_with_message(&self, message: impl Into<String>) {
        self.bar.finish_with_message(message.into());
    }

    /// Abandons the spinner, leaving an error message in place.
    pub fn abandon_with_message(&self, message: impl Into<String>) {
        self.bar.abandon_with_message(message.into());
    }
}
