//! Archive layout: `<root>/<type>/<date> - <id> - <title>/<id>_<title>.<ext>`.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::model::VideoType;

/// Per-recording folder name.
pub fn folder_name(date: NaiveDate, id: &str, title: &str) -> String {
    format!("{} - {} - {}", date.format("%Y-%m-%d"), id, title)
}

/// File stem shared by the media file and every sidecar.
pub fn file_stem(id: &str, title: &str) -> String {
    format!("{}_{}", id, title)
}

pub fn folder_path(root: &Path, video_type: VideoType, folder: &str) -> PathBuf {
    root.join(video_type.as_str()).join(folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 13).unwrap();
        assert_eq!(
            folder_name(date, "123456789", "Zelda_Run"),
            "2025-04-13 - 123456789 - Zelda_Run"
        );
        assert_eq!(file_stem("123456789", "Zelda_Run"), "123456789_Zelda_Run");
        assert_eq!(
            folder_path(Path::new("vods"), VideoType::Highlight, "x"),
            PathBuf::from("vods/highlight/x")
        );
    }
}
