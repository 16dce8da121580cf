//! One archival pass over a channel's catalog.

use std::path::PathBuf;

use crate::audit;
use crate::catalog::{enabled_types, CatalogFetcher, CatalogSource};
use crate::config::ArchiveConfig;
use crate::downloader::{DownloadExecutor, Downloader, ExecutionOutcome};
use crate::error::ArchiveError;
use crate::filter::{self, FilterCriteria};
use crate::model::{VideoType, VodRecord};
use crate::planner::{PathPlanner, Plan, SkipReason};
use crate::report;

use super::{RecordOutcome, RunSummary};

/// What the pass learned beyond the per-record tally.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Types whose fetch failed, with the error text.
    pub failed_types: Vec<(VideoType, String)>,
    /// Where the discovered-URL list was written, if it was.
    pub report_path: Option<PathBuf>,
}

pub struct Archiver<'a, S: CatalogSource + ?Sized, D: Downloader> {
    source: &'a S,
    executor: DownloadExecutor<D>,
    planner: PathPlanner,
    criteria: FilterCriteria,
    report_path: Option<PathBuf>,
}

impl<'a, S: CatalogSource + ?Sized, D: Downloader> Archiver<'a, S, D> {
    pub fn new(cfg: &ArchiveConfig, source: &'a S, downloader: D, criteria: FilterCriteria) -> Self {
        let report_path = match cfg.report_path() {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!("no location for the discovered-URL report: {:#}", e);
                None
            }
        };
        let executor = DownloadExecutor::new(downloader, cfg.retry.policy(), criteria.dry_run);
        Self::with_parts(source, executor, PathPlanner::new(cfg), criteria, report_path)
    }

    pub fn with_parts(
        source: &'a S,
        executor: DownloadExecutor<D>,
        planner: PathPlanner,
        criteria: FilterCriteria,
        report_path: Option<PathBuf>,
    ) -> Self {
        Self {
            source,
            executor,
            planner,
            criteria,
            report_path,
        }
    }

    /// Fetch, then drive every record to a terminal outcome.
    ///
    /// `summary` is updated as each record finishes, and `observe` sees every
    /// outcome in catalog order. An empty catalog is a normal, successful run.
    /// Only rejected credentials end the pass early.
    pub fn run<F>(
        &self,
        user_id: &str,
        summary: &mut RunSummary,
        mut observe: F,
    ) -> Result<RunReport, ArchiveError>
    where
        F: FnMut(&VodRecord, &RecordOutcome),
    {
        let types = enabled_types(self.criteria.video_type);
        let catalog = CatalogFetcher::new(self.source).fetch(user_id, &types)?;
        summary.discovered += catalog.records.len();
        summary.failed_types += catalog.failed_types.len();

        let mut report = RunReport {
            failed_types: catalog.failed_types,
            report_path: None,
        };

        if !self.executor.is_dry_run() {
            if let Some(path) = &self.report_path {
                match report::write_discovered(path, &catalog.records) {
                    Ok(()) => report.report_path = Some(path.clone()),
                    Err(e) => tracing::warn!("discovered-URL report not written: {:#}", e),
                }
            }
        }

        if catalog.records.is_empty() {
            tracing::info!("catalog returned no recordings; nothing to do");
            return Ok(report);
        }

        for record in &catalog.records {
            let outcome = self.process(record);
            tracing::info!(id = %record.id, outcome = %outcome, "record finished");
            summary.record(&outcome);
            observe(record, &outcome);
        }
        tracing::info!("run complete: {}", summary);
        Ok(report)
    }

    fn process(&self, record: &VodRecord) -> RecordOutcome {
        if !filter::matches(record, &self.criteria) {
            tracing::debug!(id = %record.id, "filtered out");
            return RecordOutcome::SkippedByFilter;
        }

        let task = match self.planner.plan(record) {
            Plan::Skip(SkipReason::AlreadyDownloaded { media_path }) => {
                return RecordOutcome::AlreadyExists { media_path };
            }
            Plan::Download(task) => task,
        };

        match self.executor.execute(&task) {
            ExecutionOutcome::Simulated { planned } => RecordOutcome::Simulated { planned },
            ExecutionOutcome::FailedAfterRetries {
                attempts,
                last_error,
            } => RecordOutcome::FailedAfterRetries {
                attempts,
                error: last_error.to_string(),
            },
            ExecutionOutcome::Succeeded { .. } => match audit::write_summary(&task) {
                Ok(summary_path) => RecordOutcome::Logged { summary_path },
                Err(e) => {
                    tracing::warn!(id = %task.id, "audit summary failed: {:#}", e);
                    RecordOutcome::Unlogged {
                        reason: format!("{:#}", e),
                    }
                }
            },
        }
    }
}
