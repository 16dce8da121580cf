//! Discovered-URL report: every URL the catalog returned this run, one per line.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::model::VodRecord;

/// Overwrite `path` with the source URL of every record, in catalog order.
pub fn write_discovered(path: &Path, records: &[VodRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    let mut body = String::new();
    for r in records {
        body.push_str(&r.source_url);
        body.push('\n');
    }
    fs::write(path, body).with_context(|| format!("write report {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "discovered URLs written");
    Ok(())
}
