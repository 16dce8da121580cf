//! Default command: one archival pass over the configured channel.

use anyhow::Result;
use std::path::Path;
use vodarc_core::archive::{Archiver, RunSummary};
use vodarc_core::catalog::HelixClient;
use vodarc_core::deps;
use vodarc_core::downloader::YtDlp;
use vodarc_core::filter::FilterCriteria;

use super::load_config;
use crate::cli::RunStatus;

pub fn run_archive(config: Option<&Path>, criteria: FilterCriteria, strict: bool) -> Result<RunStatus> {
    let (cfg, cfg_path) = load_config(config)?;
    cfg.validate(&cfg_path)?;
    let tools = deps::check_dependencies(&cfg)?;

    let helix = HelixClient::new(&cfg);
    let user_id = helix.resolve_user_id(&cfg.channel)?;
    tracing::info!(channel = %cfg.channel, %user_id, ?criteria, "starting run");
    if criteria.dry_run {
        println!("dry run: nothing will be downloaded or written");
    }

    let tool = YtDlp::new(tools.downloader, &cfg.cookies_file, &cfg.media_extension);
    let archiver = Archiver::new(&cfg, &helix, tool, criteria);

    let mut summary = RunSummary::default();
    let report = archiver.run(&user_id, &mut summary, |rec, outcome| {
        println!("[{}] {} {}: {}", rec.video_type, rec.id, rec.title, outcome);
    })?;

    for (video_type, err) in &report.failed_types {
        eprintln!("warning: could not list {} recordings: {}", video_type, err);
    }
    if summary.discovered == 0 {
        println!("no recordings found");
    }
    if let Some(path) = &report.report_path {
        println!("discovered URLs written to {}", path.display());
    }
    println!("{}", summary);

    if (strict || cfg.strict) && summary.has_failures() {
        return Ok(RunStatus::StrictFailures);
    }
    Ok(RunStatus::Clean)
}
