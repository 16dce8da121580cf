//! Terminal per-record outcomes and the run tally.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Did not match the active filters.
    SkippedByFilter,
    /// The planned media file is already on disk.
    AlreadyExists { media_path: PathBuf },
    /// Dry run: would have downloaded to `planned`.
    Simulated { planned: PathBuf },
    FailedAfterRetries { attempts: u32, error: String },
    /// Downloaded and summarized.
    Logged { summary_path: PathBuf },
    /// Downloaded, but the audit summary could not be written.
    Unlogged { reason: String },
}

impl RecordOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RecordOutcome::FailedAfterRetries { .. })
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self, RecordOutcome::Logged { .. } | RecordOutcome::Unlogged { .. })
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordOutcome::SkippedByFilter => write!(f, "skipped (filter)"),
            RecordOutcome::AlreadyExists { media_path } => {
                write!(f, "already present: {}", media_path.display())
            }
            RecordOutcome::Simulated { planned } => {
                write!(f, "dry run, would download to {}", planned.display())
            }
            RecordOutcome::FailedAfterRetries { attempts, error } => {
                write!(f, "FAILED after {} attempt(s): {}", attempts, error)
            }
            RecordOutcome::Logged { summary_path } => {
                write!(f, "downloaded, summary at {}", summary_path.display())
            }
            RecordOutcome::Unlogged { reason } => {
                write!(f, "downloaded, summary not written: {}", reason)
            }
        }
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    /// Records that passed the filters.
    pub matched: usize,
    pub skipped_by_filter: usize,
    pub already_present: usize,
    pub downloaded: usize,
    pub simulated: usize,
    pub failed: usize,
    /// Catalog types whose fetch failed and were treated as empty.
    pub failed_types: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &RecordOutcome) {
        if *outcome == RecordOutcome::SkippedByFilter {
            self.skipped_by_filter += 1;
            return;
        }
        self.matched += 1;
        if outcome.is_failure() {
            self.failed += 1;
        } else if outcome.is_downloaded() {
            self.downloaded += 1;
        } else if let RecordOutcome::Simulated { .. } = outcome {
            self.simulated += 1;
        } else {
            self.already_present += 1;
        }
    }

    /// Any record ended in `FailedAfterRetries`.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "discovered {}, matched {}, skipped by filter {}, already present {}, downloaded {}, simulated {}, failed {}",
            self.discovered,
            self.matched,
            self.skipped_by_filter,
            self.already_present,
            self.downloaded,
            self.simulated,
            self.failed
        )?;
        if self.failed_types > 0 {
            write!(f, " ({} catalog type(s) unavailable)", self.failed_types)?;
        }
        Ok(())
    }
}
