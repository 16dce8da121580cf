//! CLI command handlers, one per file.

mod archive;
mod convert_cookies;

pub use archive::run_archive;
pub use convert_cookies::run_convert_cookies;

use anyhow::Result;
use std::path::{Path, PathBuf};
use vodarc_core::config::{self, ArchiveConfig};

/// Config from `--config` or the XDG default, with the path it came from.
fn load_config(explicit: Option<&Path>) -> Result<(ArchiveConfig, PathBuf)> {
    let loaded = match explicit {
        Some(p) => (config::load_or_init_at(p)?, p.to_path_buf()),
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config from {}: {:?}", loaded.1.display(), loaded.0);
    Ok(loaded)
}
