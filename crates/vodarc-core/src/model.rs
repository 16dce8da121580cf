//! Catalog records as seen by the rest of the pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category substituted when the catalog has none for a recording.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Kind of recording, as partitioned by the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Archive,
    Highlight,
    Upload,
}

impl VideoType {
    /// Every type, in fetch order.
    pub const ALL: [VideoType; 3] = [VideoType::Archive, VideoType::Highlight, VideoType::Upload];

    pub fn as_str(self) -> &'static str {
        match self {
            VideoType::Archive => "archive",
            VideoType::Highlight => "highlight",
            VideoType::Upload => "upload",
        }
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "archive" => Ok(VideoType::Archive),
            "highlight" => Ok(VideoType::Highlight),
            "upload" => Ok(VideoType::Upload),
            other => Err(format!(
                "unknown video type '{other}' (expected archive, highlight or upload)"
            )),
        }
    }
}

/// One recording from the remote inventory. Built fresh every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VodRecord {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// `None` when the catalog had no category/game label.
    pub category: Option<String>,
    /// Type under which the record was fetched.
    pub video_type: VideoType,
    pub source_url: String,
}

impl VodRecord {
    /// Calendar date of the upload, used for planning and date filters.
    pub fn upload_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Category, or the `Unknown` sentinel.
    pub fn category_or_unknown(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }
}
