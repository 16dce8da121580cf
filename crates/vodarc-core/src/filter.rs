//! User-supplied selection criteria and the predicate that applies them.

use crate::model::{VideoType, VodRecord};
use crate::planner::normalize_id;

/// Built once from CLI input. Every field is optional; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub id: Option<String>,
    pub url: Option<String>,
    /// Prefix of the `YYYY-MM-DD` upload date (`2025`, `2025-04`, `2025-04-13`).
    pub date: Option<String>,
    /// Compared case-insensitively and exactly against the record category.
    pub category: Option<String>,
    pub video_type: Option<VideoType>,
    /// Plan and report without invoking the downloader or writing files.
    pub dry_run: bool,
}

impl FilterCriteria {
    /// True when no sub-criterion is set.
    pub fn is_unconstrained(&self) -> bool {
        self.id.is_none()
            && self.url.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.video_type.is_none()
    }
}

/// True iff every specified sub-criterion matches `record`.
pub fn matches(record: &VodRecord, criteria: &FilterCriteria) -> bool {
    if let Some(id) = &criteria.id {
        if normalize_id(id.trim()) != normalize_id(&record.id) {
            return false;
        }
    }
    if let Some(url) = &criteria.url {
        if url.trim() != record.source_url {
            return false;
        }
    }
    if let Some(prefix) = &criteria.date {
        let date = record.upload_date().format("%Y-%m-%d").to_string();
        if !date.starts_with(prefix.trim()) {
            return false;
        }
    }
    if let Some(t) = criteria.video_type {
        if record.video_type != t {
            return false;
        }
    }
    if let Some(wanted) = &criteria.category {
        if record.category.is_none() {
            tracing::warn!(
                id = %record.id,
                title = %record.title,
                "recording has no category; comparing category filter against \"Unknown\""
            );
        }
        if record.category_or_unknown().to_lowercase() != wanted.trim().to_lowercase() {
            return false;
        }
    }
    true
}
