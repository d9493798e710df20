//! Human-readable summaries for CLI batch operations.

use std::path::Path;

use mojic::Error;

/// Outcome of processing a single file.
pub enum FileOutcome {
    /// Succeeded, writing to the given output path.
    Ok,
    /// Failed with the given error.
    Err(Error),
}

/// Accumulates per-file outcomes for a (possibly recursive) batch operation
/// and renders a final summary, mirroring the teacher's extract/test result
/// reporting.
#[derive(Default)]
pub struct BatchSummary {
    ok_count: usize,
    failed: Vec<(String, String)>,
}

impl BatchSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of processing `path`.
    pub fn record(&mut self, path: &Path, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Ok => self.ok_count += 1,
            FileOutcome::Err(err) => self.failed.push((path.display().to_string(), err.to_string())),
        }
    }

    /// True if every recorded file succeeded.
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files that succeeded.
    pub fn ok_count(&self) -> usize {
        self.ok_count
    }

    /// Number of files recorded so far.
    pub fn total(&self) -> usize {
        self.ok_count + self.failed.len()
    }

    /// Renders the summary for printing to stderr. Empty for a single
    /// successful file, since the per-file success is obvious from the
    /// output path already printed.
    pub fn render(&self) -> String {
        if self.total() <= 1 && self.all_ok() {
            return String::new();
        }
        let mut out = format!("{} succeeded, {} failed\n", self.ok_count, self.failed.len());
        if !self.failed.is_empty() {
            out.push_str("\nFailures:\n");
            for (path, message) in &self.failed {
                out.push_str(&format!("  {path}: {message}\n"));
            }
        }
        out
    }
}
