//! Per-item audit summary written beside a freshly downloaded recording.
//!
//! The summary is informational only. Nothing reads it back, and it never
//! decides whether a recording is present.

mod sidecar;

pub use sidecar::InfoSidecar;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::model::UNKNOWN_CATEGORY;
use crate::planner::DownloadTask;

/// Fields that end up in the summary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    pub upload_date: String,
    pub duration: String,
    pub url: String,
}

impl AuditRecord {
    /// Sidecar values first, then what the catalog told us, then `Unknown`.
    pub fn from_sidecar(task: &DownloadTask, info: &InfoSidecar) -> Self {
        let rec = &task.record;
        Self {
            id: non_empty(info.id.as_deref()).unwrap_or(&rec.id).to_string(),
            title: non_empty(info.title.as_deref()).unwrap_or(&rec.title).to_string(),
            category: info
                .category()
                .or(rec.category.as_deref())
                .unwrap_or(UNKNOWN_CATEGORY)
                .to_string(),
            upload_date: info
                .upload_date_iso()
                .unwrap_or_else(|| rec.upload_date().format("%Y-%m-%d").to_string()),
            duration: info.duration_hms().unwrap_or_else(|| "Unknown".to_string()),
            url: non_empty(info.webpage_url.as_deref())
                .unwrap_or(&rec.source_url)
                .to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "ID: {}\nTitle: {}\nCategory: {}\nUpload Date: {}\nDuration: {}\nURL: {}\n",
            self.id, self.title, self.category, self.upload_date, self.duration, self.url
        )
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Read the sidecar for `task`, write `<stem>.summary.txt` (overwriting), and
/// return its path.
pub fn write_summary(task: &DownloadTask) -> Result<PathBuf> {
    let sidecar = task.sidecar_path();
    let data = fs::read_to_string(&sidecar)
        .with_context(|| format!("read metadata sidecar {}", sidecar.display()))?;
    let info: InfoSidecar = serde_json::from_str(&data)
        .with_context(|| format!("decode metadata sidecar {}", sidecar.display()))?;
    let record = AuditRecord::from_sidecar(task, &info);

    let out = task.summary_path();
    fs::write(&out, record.render())
        .with_context(|| format!("write summary {}", out.display()))?;
    tracing::debug!(id = %task.id, path = %out.display(), "audit summary written");
    Ok(out)
}
