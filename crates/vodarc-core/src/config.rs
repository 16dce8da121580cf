use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ArchiveError;
use crate::retry::RetryPolicy;

const PLACEHOLDER_CLIENT_ID: &str = "your_client_id_here";
const PLACEHOLDER_ACCESS_TOKEN: &str = "your_access_token_here";
const PLACEHOLDER_CHANNEL: &str = "your_channel_here";

/// Largest page the catalog API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of downloader invocations per recording (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts.
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 5,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_secs(self.delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/vodarc/config.toml`.
///
/// Built once at startup, validated, then passed by reference everywhere.
#[derive(Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Application identifier sent as `Client-Id`.
    pub client_id: String,
    /// Bearer token for the catalog API.
    pub access_token: String,
    /// Channel login whose recordings are archived.
    pub channel: String,
    /// Netscape-format cookie file handed to the downloader.
    pub cookies_file: PathBuf,
    /// Root of the archive tree.
    #[serde(default = "default_archive_root")]
    pub archive_root: PathBuf,
    /// External downloader binary (name on PATH or absolute path).
    #[serde(default = "default_downloader")]
    pub downloader: String,
    /// Container extension of the primary media file.
    #[serde(default = "default_media_extension")]
    pub media_extension: String,
    /// Upper bound on the sanitized title length.
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Exit nonzero when any recording ends in FailedAfterRetries.
    #[serde(default)]
    pub strict: bool,
    /// Where the discovered-URL report goes (None = XDG state dir).
    #[serde(default)]
    pub report_file: Option<PathBuf>,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_archive_root() -> PathBuf {
    PathBuf::from("vods")
}

fn default_downloader() -> String {
    "yt-dlp".to_string()
}

fn default_media_extension() -> String {
    "mp4".to_string()
}

fn default_max_title_len() -> usize {
    100
}

fn default_api_base() -> String {
    "https://api.twitch.tv/helix".to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            client_id: PLACEHOLDER_CLIENT_ID.to_string(),
            access_token: PLACEHOLDER_ACCESS_TOKEN.to_string(),
            channel: PLACEHOLDER_CHANNEL.to_string(),
            cookies_file: default_cookies_file(),
            archive_root: default_archive_root(),
            downloader: default_downloader(),
            media_extension: default_media_extension(),
            max_title_len: default_max_title_len(),
            api_base: default_api_base(),
            page_size: default_page_size(),
            strict: false,
            report_file: None,
            retry: RetryConfig::default(),
        }
    }
}

impl fmt::Debug for ArchiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveConfig")
            .field("client_id", &self.client_id)
            .field("access_token", &"<redacted>")
            .field("channel", &self.channel)
            .field("cookies_file", &self.cookies_file)
            .field("archive_root", &self.archive_root)
            .field("downloader", &self.downloader)
            .field("media_extension", &self.media_extension)
            .field("max_title_len", &self.max_title_len)
            .field("api_base", &self.api_base)
            .field("page_size", &self.page_size)
            .field("strict", &self.strict)
            .field("report_file", &self.report_file)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ArchiveConfig {
    /// Checks that required settings are present and not left at their placeholders.
    /// `source` names the file in the diagnostic.
    pub fn validate(&self, source: &Path) -> Result<(), ArchiveError> {
        let required = [
            ("client_id", self.client_id.as_str(), PLACEHOLDER_CLIENT_ID),
            ("access_token", self.access_token.as_str(), PLACEHOLDER_ACCESS_TOKEN),
            ("channel", self.channel.as_str(), PLACEHOLDER_CHANNEL),
        ];
        for (key, value, placeholder) in required {
            let value = value.trim();
            if value.is_empty() || value == placeholder {
                return Err(ArchiveError::configuration(format!(
                    "'{}' is not set; edit {}",
                    key,
                    source.display()
                )));
            }
        }
        if self.cookies_file.as_os_str().is_empty() {
            return Err(ArchiveError::configuration(format!(
                "'cookies_file' is not set; edit {}",
                source.display()
            )));
        }
        if !self.cookies_file.is_file() {
            return Err(ArchiveError::configuration(format!(
                "cookie file {} does not exist; export browser cookies and run `vodarc convert-cookies`",
                self.cookies_file.display()
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(ArchiveError::configuration(format!(
                "'retry.max_attempts' must be at least 1; edit {}",
                source.display()
            )));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ArchiveError::configuration(format!(
                "'page_size' must be between 1 and {}; edit {}",
                MAX_PAGE_SIZE,
                source.display()
            )));
        }
        if self.media_extension.trim().is_empty() || self.downloader.trim().is_empty() {
            return Err(ArchiveError::configuration(format!(
                "'downloader' and 'media_extension' must not be empty; edit {}",
                source.display()
            )));
        }
        Ok(())
    }

    /// Location of the discovered-URL report for this run.
    pub fn report_path(&self) -> Result<PathBuf> {
        match &self.report_file {
            Some(p) => Ok(p.clone()),
            None => {
                let xdg_dirs = xdg::BaseDirectories::with_prefix("vodarc")?;
                Ok(xdg_dirs.place_state_file("discovered_urls.txt")?)
            }
        }
    }
}

fn default_cookies_file() -> PathBuf {
    config_file("cookies.txt").unwrap_or_else(|_| PathBuf::from("cookies.txt"))
}

/// Path of `name` inside the vodarc config directory. Does not create anything.
pub fn config_file(name: &str) -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vodarc")?;
    Ok(xdg_dirs.get_config_file(name))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vodarc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default XDG location, creating a placeholder file if none exists.
pub fn load_or_init() -> Result<(ArchiveConfig, PathBuf)> {
    let path = config_path()?;
    let cfg = load_or_init_at(&path)?;
    Ok((cfg, path))
}

/// Load configuration from `path`, writing a placeholder file there if it is missing.
pub fn load_or_init_at(path: &Path) -> Result<ArchiveConfig> {
    if !path.exists() {
        let default_cfg = ArchiveConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ArchiveConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
