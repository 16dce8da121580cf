//! `yt-dlp` (or a compatible fork) as the download backend.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{DownloadError, Downloader};
use crate::planner::DownloadTask;

/// Invokes the external tool once per attempt. Output is passed through to the
/// terminal so the tool's own progress display stays visible.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: PathBuf,
    media_extension: String,
}

impl YtDlp {
    pub fn new(binary: impl Into<PathBuf>, cookies_file: impl Into<PathBuf>, media_extension: &str) -> Self {
        Self {
            binary: binary.into(),
            cookies_file: cookies_file.into(),
            media_extension: media_extension.trim_start_matches('.').to_string(),
        }
    }

    /// Arguments for one attempt, in order. The remux keeps the final
    /// container at the extension the planner expects.
    pub fn command_args(&self, task: &DownloadTask) -> Vec<OsString> {
        vec![
            "--cookies".into(),
            self.cookies_file.clone().into_os_string(),
            "--write-info-json".into(),
            "--write-description".into(),
            "--write-thumbnail".into(),
            "--restrict-filenames".into(),
            "--no-overwrites".into(),
            "--remux-video".into(),
            self.media_extension.clone().into(),
            "-o".into(),
            task.output_template().into_os_string(),
            task.record.source_url.clone().into(),
        ]
    }
}

impl Downloader for YtDlp {
    fn download(&self, task: &DownloadTask) -> Result<(), DownloadError> {
        let args = self.command_args(task);
        tracing::debug!(binary = %self.binary.display(), ?args, "spawning downloader");
        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(DownloadError::Launch)?;
        if status.success() {
            Ok(())
        } else {
            Err(DownloadError::Exit(status.code()))
        }
    }
}
