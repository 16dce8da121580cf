//! Download execution: one external-tool invocation per attempt, wrapped in
//! the shared retry policy, with a dry-run short circuit.

mod ytdlp;

pub use ytdlp::YtDlp;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::planner::DownloadTask;
use crate::retry::{self, ErrorKind, RetryPolicy, Retryable};

/// Error from one downloader attempt.
#[derive(Debug)]
pub enum DownloadError {
    /// The tool ran and exited unsuccessfully (`None` = killed by a signal).
    Exit(Option<i32>),
    /// The tool could not be started.
    Launch(std::io::Error),
    /// Preparing the target folder failed.
    Storage(std::io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Exit(Some(code)) => write!(f, "downloader exited with status {}", code),
            DownloadError::Exit(None) => write!(f, "downloader terminated by signal"),
            DownloadError::Launch(e) => write!(f, "could not start downloader: {}", e),
            DownloadError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Launch(e) | DownloadError::Storage(e) => Some(e),
            DownloadError::Exit(_) => None,
        }
    }
}

impl Retryable for DownloadError {
    fn kind(&self) -> ErrorKind {
        match self {
            DownloadError::Exit(_) => ErrorKind::Transient,
            DownloadError::Launch(_) | DownloadError::Storage(_) => ErrorKind::Permanent,
        }
    }
}

/// Something that can fetch a planned recording into its folder.
pub trait Downloader {
    fn download(&self, task: &DownloadTask) -> Result<(), DownloadError>;
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn download(&self, task: &DownloadTask) -> Result<(), DownloadError> {
        (**self).download(task)
    }
}

/// Result of executing one task.
#[derive(Debug)]
pub enum ExecutionOutcome {
    Succeeded { attempts: u32 },
    /// Dry run: nothing was invoked; `planned` is where the media would land.
    Simulated { planned: PathBuf },
    FailedAfterRetries { attempts: u32, last_error: DownloadError },
}

pub struct DownloadExecutor<D> {
    downloader: D,
    policy: RetryPolicy,
    dry_run: bool,
}

impl<D: Downloader> DownloadExecutor<D> {
    pub fn new(downloader: D, policy: RetryPolicy, dry_run: bool) -> Self {
        Self {
            downloader,
            policy,
            dry_run,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn execute(&self, task: &DownloadTask) -> ExecutionOutcome {
        if self.dry_run {
            tracing::info!(id = %task.id, path = %task.media_path.display(), "dry run: would download");
            return ExecutionOutcome::Simulated {
                planned: task.media_path.clone(),
            };
        }

        if let Err(e) = fs::create_dir_all(&task.folder) {
            return ExecutionOutcome::FailedAfterRetries {
                attempts: 0,
                last_error: DownloadError::Storage(e),
            };
        }

        let result = retry::run_with_retry(&self.policy, |attempt| {
            tracing::info!(
                id = %task.id,
                attempt,
                max = self.policy.max_attempts,
                url = %task.record.source_url,
                "invoking downloader"
            );
            self.downloader.download(task)
        });

        match result {
            Ok(done) => {
                if !task.media_path.exists() {
                    tracing::warn!(
                        id = %task.id,
                        path = %task.media_path.display(),
                        "downloader reported success but the planned media file is missing; it will be fetched again next run"
                    );
                }
                ExecutionOutcome::Succeeded {
                    attempts: done.attempts,
                }
            }
            Err(exhausted) => {
                tracing::error!(id = %task.id, "download failed: {}", exhausted);
                ExecutionOutcome::FailedAfterRetries {
                    attempts: exhausted.attempts,
                    last_error: exhausted.last_error,
                }
            }
        }
    }
}
