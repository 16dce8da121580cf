//! The downloader's `.info.json` sidecar, decoded to the fields we report on.

use serde::Deserialize;

/// Subset of the sidecar document. Every field is optional; the tool omits
/// keys it could not determine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfoSidecar {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYYMMDD`
    #[serde(default)]
    pub upload_date: Option<String>,
    /// Seconds; the tool emits floats for some extractors.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub webpage_url: Option<String>,
}

impl InfoSidecar {
    pub fn category(&self) -> Option<&str> {
        self.categories
            .iter()
            .chain(self.tags.iter())
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    /// `upload_date` as `YYYY-MM-DD`, if it is eight digits.
    pub fn upload_date_iso(&self) -> Option<String> {
        let raw = self.upload_date.as_deref()?.trim();
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8]))
    }

    pub fn duration_hms(&self) -> Option<String> {
        let secs = self.duration?;
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        Some(format_hms(secs as u64))
    }
}

pub(crate) fn format_hms(total: u64) -> String {
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_typical_sidecar() {
        let json = r#"{
            "id": "v123",
            "title": "Zelda: Run!!",
            "categories": [],
            "tags": ["Zelda", "speedrun"],
            "upload_date": "20250413",
            "duration": 3725.4,
            "webpage_url": "https://www.twitch.tv/videos/123",
            "formats": [{"format_id": "1080p"}]
        }"#;
        let s: InfoSidecar = serde_json::from_str(json).unwrap();
        assert_eq!(s.category(), Some("Zelda"));
        assert_eq!(s.upload_date_iso().as_deref(), Some("2025-04-13"));
        assert_eq!(s.duration_hms().as_deref(), Some("01:02:05"));
    }

    #[test]
    fn categories_take_precedence_over_tags() {
        let s = InfoSidecar {
            categories: vec!["Celeste".into()],
            tags: vec!["Zelda".into()],
            ..Default::default()
        };
        assert_eq!(s.category(), Some("Celeste"));
    }

    #[test]
    fn malformed_date_is_ignored() {
        let s = InfoSidecar {
            upload_date: Some("2025-04-13".into()),
            ..Default::default()
        };
        assert_eq!(s.upload_date_iso(), None);
    }

    #[test]
    fn hms_past_a_day() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(90_061), "25:01:01");
    }
}
