//! Startup check for the external tools a run shells out to.

use std::path::PathBuf;

use crate::config::ArchiveConfig;
use crate::error::ArchiveError;

/// The downloader remuxes through ffmpeg.
const FFMPEG: &str = "ffmpeg";

/// Resolved locations of the required tools.
#[derive(Debug, Clone)]
pub struct Dependencies {
    pub downloader: PathBuf,
    pub ffmpeg: PathBuf,
}

/// Locate `name` on PATH (or accept it as-is when it is an existing path).
pub fn locate(name: &str, hint: &str) -> Result<PathBuf, ArchiveError> {
    which::which(name).map_err(|_| ArchiveError::DependencyMissing {
        name: name.to_string(),
        hint: hint.to_string(),
    })
}

pub fn check_dependencies(cfg: &ArchiveConfig) -> Result<Dependencies, ArchiveError> {
    let downloader = locate(
        &cfg.downloader,
        "install yt-dlp (e.g. `pipx install yt-dlp`) or set `downloader` in the config",
    )?;
    let ffmpeg = locate(FFMPEG, "install ffmpeg with your package manager")?;
    tracing::debug!(
        downloader = %downloader.display(),
        ffmpeg = %ffmpeg.display(),
        "external tools found"
    );
    Ok(Dependencies { downloader, ffmpeg })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_names_itself() {
        let err = locate("vodarc-nonexistent-tool-xyz", "install it").unwrap_err();
        match err {
            ArchiveError::DependencyMissing { name, hint } => {
                assert_eq!(name, "vodarc-nonexistent-tool-xyz");
                assert_eq!(hint, "install it");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_downloader_fails_check() {
        let cfg = ArchiveConfig {
            downloader: "vodarc-nonexistent-downloader".to_string(),
            ..ArchiveConfig::default()
        };
        assert!(matches!(
            check_dependencies(&cfg),
            Err(ArchiveError::DependencyMissing { name, .. }) if name == "vodarc-nonexistent-downloader"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn locate_agrees_with_which() {
        assert_eq!(locate("sh", "").ok(), which::which("sh").ok());
    }
}
