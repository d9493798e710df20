//! Progress reporting for the CLI's single-file and recursive-directory
//! operations.
//!
//! The engine runs each file's `encode_stream`/`decode_stream` as one
//! synchronous call with no mid-flight byte progress to report, so this
//! trait only covers per-file bookkeeping for a `--recursive` walk.
//!
//! # Example
//!
//! ```rust
//! use mojic::progress::{NoProgress, ProgressReporter};
//!
//! let mut progress = NoProgress;
//! progress.on_entry_start("example.c", 0);
//! progress.on_entry_complete("example.c", true);
//! ```

/// Progress reporting trait for encode/decode operations.
///
/// Per-file bookkeeping for recursive directory operations: the CLI's
/// `--recursive` walk reports a start/complete pair for every file it
/// processes.
pub trait ProgressReporter: Send {
    /// Called when starting to process a new file during a recursive walk.
    fn on_entry_start(&mut self, path: &str, size: u64) {
        let _ = (path, size);
    }

    /// Called when a file finishes processing.
    fn on_entry_complete(&mut self, path: &str, success: bool) {
        let _ = (path, success);
    }

    /// Called on any warning during processing (e.g. a skipped file).
    fn on_warning(&mut self, message: &str) {
        let _ = message;
    }
}

/// A progress reporter that does nothing (null object pattern).
#[derive(Debug, Default, Clone)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_progress_accepts_all_hooks() {
        let mut progress = NoProgress;
        progress.on_entry_start("a.c", 500);
        progress.on_entry_complete("a.c", true);
        progress.on_warning("skipped a.txt");
    }
}
