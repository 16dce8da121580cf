//! Helix response bodies, decoded once into typed records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{VideoType, VodRecord};

/// `GET /videos` response.
#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub data: Vec<RawVideo>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVideo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "game_name")]
    pub category: Option<String>,
}

/// `GET /users` response.
#[derive(Debug, Deserialize)]
pub(crate) struct UsersResponse {
    #[serde(default)]
    pub data: Vec<RawUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    pub id: String,
}

impl RawVideo {
    /// Validates required fields and tags the record with the type it was fetched under.
    pub(crate) fn into_record(self, video_type: VideoType) -> Result<VodRecord, String> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err("missing id".to_string());
        }
        let source_url = self.url.trim().to_string();
        if source_url.is_empty() {
            return Err(format!("video {} has no url", id));
        }
        let created_raw = self
            .created_at
            .ok_or_else(|| format!("video {} has no created_at", id))?;
        let created_at = DateTime::parse_from_rfc3339(created_raw.trim())
            .map_err(|e| format!("video {} has bad created_at '{}': {}", id, created_raw, e))?
            .with_timezone(&Utc);
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Ok(VodRecord {
            id,
            title: self.title.unwrap_or_default(),
            created_at,
            category,
            video_type,
            source_url,
        })
    }
}

/// Next cursor, treating `""` the same as absent.
pub(crate) fn next_cursor(p: Pagination) -> Option<String> {
    p.cursor.filter(|c| !c.trim().is_empty())
}
