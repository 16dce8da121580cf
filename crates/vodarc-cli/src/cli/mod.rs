//! CLI for the vodarc VOD archiver.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vodarc_core::filter::FilterCriteria;
use vodarc_core::model::VideoType;

use commands::{run_archive, run_convert_cookies};

/// Top-level CLI. Without a subcommand it runs one archival pass.
#[derive(Debug, Parser)]
#[command(name = "vodarc")]
#[command(about = "vodarc: archive a channel's past broadcasts, highlights and uploads", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Read this config file instead of ~/.config/vodarc/config.toml.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Exit with status 2 if any recording failed to download.
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Selection flags for an archival pass. All of them must match.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only the recording with this id (a leading `v` is ignored).
    #[arg(long)]
    pub id: Option<String>,

    /// Only the recording with this exact URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Upload date prefix: YYYY, YYYY-MM or YYYY-MM-DD.
    #[arg(long, value_parser = parse_date_prefix)]
    pub date: Option<String>,

    /// Category/game name, case-insensitive. Use "Unknown" for uncategorized recordings.
    #[arg(long)]
    pub category: Option<String>,

    /// Only fetch and download this recording type.
    #[arg(long = "type", value_name = "archive|highlight|upload", value_parser = parse_video_type)]
    pub video_type: Option<VideoType>,

    /// Show what would be downloaded without running the downloader or writing files.
    #[arg(long)]
    pub dry_run: bool,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(a: FilterArgs) -> Self {
        FilterCriteria {
            id: a.id,
            url: a.url,
            date: a.date,
            category: a.category,
            video_type: a.video_type,
            dry_run: a.dry_run,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Convert a browser cookie export (JSON) into the Netscape cookie file the downloader reads.
    ConvertCookies {
        /// JSON export (default: cookies.json next to config.toml).
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Destination (default: `cookies_file` from the config).
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// How a successful invocation should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Clean,
    /// `--strict` and at least one recording failed.
    StrictFailures,
}

fn parse_video_type(s: &str) -> Result<VideoType, String> {
    s.parse()
}

fn parse_date_prefix(s: &str) -> Result<String, String> {
    let s = s.trim();
    let shape_ok = match s.len() {
        4 => s.bytes().all(|b| b.is_ascii_digit()),
        7 | 10 => s
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() }),
        _ => false,
    };
    if shape_ok {
        Ok(s.to_string())
    } else {
        Err(format!("'{}' is not YYYY, YYYY-MM or YYYY-MM-DD", s))
    }
}

impl Cli {
    pub fn run_from_args() -> Result<RunStatus> {
        let cli = Cli::parse();
        match cli.command {
            Some(CliCommand::ConvertCookies { input, output }) => {
                run_convert_cookies(cli.config.as_deref(), input, output)?;
                Ok(RunStatus::Clean)
            }
            None => run_archive(cli.config.as_deref(), cli.filters.into(), cli.strict),
        }
    }
}

#[cfg(test)]
mod tests;
