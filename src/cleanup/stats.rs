//! Cleanup Statistics Module
//!
//! Running totals across the passes of one service run. Reset on restart.

use chrono::{DateTime, Local};

use crate::cleanup::{CleanupReport, PassOutcome};

// == Cleanup Stats ==
/// Tracks what the service has done since it started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupStats {
    /// Number of passes run
    pub passes: u64,
    /// Files deleted across all passes
    pub files_deleted: u64,
    /// Delete attempts that failed across all passes
    pub delete_failures: u64,
    /// Passes ended early by an operation-level error
    pub failed_passes: u64,
    /// When the most recent pass finished
    pub last_pass_at: Option<DateTime<Local>>,
}

impl CleanupStats {
    // == Constructor ==
    /// Creates a new CleanupStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Pass ==
    /// Folds one pass report into the totals.
    pub fn record(&mut self, report: &CleanupReport) {
        self.passes += 1;
        self.files_deleted += report.deleted() as u64;
        self.delete_failures += report.failed() as u64;
        if matches!(report.outcome, PassOutcome::Failed(_)) {
            self.failed_passes += 1;
        }
        self.last_pass_at = Some(Local::now());
    }

    // == Success Rate ==
    /// Share of delete attempts that succeeded.
    ///
    /// Returns deleted / (deleted + failures), or 0.0 if nothing was attempted.
    pub fn success_rate(&self) -> f64 {
        let total = self.files_deleted + self.delete_failures;
        if total == 0 {
            0.0
        } else {
            self.files_deleted as f64 / total as f64
        }
    }
}
