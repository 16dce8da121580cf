//! Deterministic placement of recordings in the archive tree, and the
//! existence check that makes re-runs idempotent.
//!
//! The existence check is a plain `Path::exists` on the planned media file. It
//! assumes a single sequential writer.

mod path;
mod sanitize;

pub use path::{file_stem, folder_name};
pub use sanitize::{normalize_id, sanitize_title};

use std::path::{Path, PathBuf};

use crate::config::ArchiveConfig;
use crate::model::VodRecord;

/// Everything needed to fetch one recording into its planned location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub record: VodRecord,
    /// Normalized id (type marker stripped).
    pub id: String,
    /// Sanitized title.
    pub title: String,
    /// `<root>/<type>/<date> - <id> - <title>`
    pub folder: PathBuf,
    /// `<folder>/<id>_<title>.<ext>`
    pub media_path: PathBuf,
}

impl DownloadTask {
    pub fn stem(&self) -> String {
        file_stem(&self.id, &self.title)
    }

    /// Output template for the downloader; only the extension is left to the tool.
    pub fn output_template(&self) -> PathBuf {
        self.folder.join(format!("{}.%(ext)s", self.stem()))
    }

    /// Metadata sidecar written next to the media file.
    pub fn sidecar_path(&self) -> PathBuf {
        self.folder.join(format!("{}.info.json", self.stem()))
    }

    /// Human-readable audit summary.
    pub fn summary_path(&self) -> PathBuf {
        self.folder.join(format!("{}.summary.txt", self.stem()))
    }
}

/// Why a surviving record needs no download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyDownloaded { media_path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Skip(SkipReason),
    Download(DownloadTask),
}

#[derive(Debug, Clone)]
pub struct PathPlanner {
    root: PathBuf,
    media_extension: String,
    max_title_len: usize,
}

impl PathPlanner {
    pub fn new(cfg: &ArchiveConfig) -> Self {
        Self::with_root(&cfg.archive_root, &cfg.media_extension, cfg.max_title_len)
    }

    pub fn with_root(root: &Path, media_extension: &str, max_title_len: usize) -> Self {
        Self {
            root: root.to_path_buf(),
            media_extension: media_extension.trim_start_matches('.').to_string(),
            max_title_len: max_title_len.max(1),
        }
    }

    /// Pure path computation; same record, same task.
    pub fn task_for(&self, record: &VodRecord) -> DownloadTask {
        let id = normalize_id(&record.id);
        let title = sanitize_title(&record.title, self.max_title_len);
        let folder = path::folder_path(
            &self.root,
            record.video_type,
            &folder_name(record.upload_date(), &id, &title),
        );
        let media_path = folder.join(format!("{}.{}", file_stem(&id, &title), self.media_extension));
        DownloadTask {
            record: record.clone(),
            id,
            title,
            folder,
            media_path,
        }
    }

    /// Skip if the planned media file already exists, otherwise a task to run.
    pub fn plan(&self, record: &VodRecord) -> Plan {
        let task = self.task_for(record);
        if task.media_path.exists() {
            Plan::Skip(SkipReason::AlreadyDownloaded {
                media_path: task.media_path,
            })
        } else {
            Plan::Download(task)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VideoType;
    use chrono::{TimeZone, Utc};

    fn zelda() -> VodRecord {
        VodRecord {
            id: "123456789".to_string(),
            title: "Zelda: Run!!".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 13, 18, 22, 11).unwrap(),
            category: Some("Zelda".to_string()),
            video_type: VideoType::Archive,
            source_url: "https://www.twitch.tv/videos/123456789".to_string(),
        }
    }

    #[test]
    fn plans_expected_layout() {
        let planner = PathPlanner::with_root(Path::new("vods"), "mp4", 100);
        let task = planner.task_for(&zelda());
        assert_eq!(
            task.folder,
            PathBuf::from("vods/archive/2025-04-13 - 123456789 - Zelda_Run")
        );
        assert_eq!(
            task.media_path,
            PathBuf::from("vods/archive/2025-04-13 - 123456789 - Zelda_Run/123456789_Zelda_Run.mp4")
        );
        assert_eq!(
            task.sidecar_path().file_name().unwrap(),
            "123456789_Zelda_Run.info.json"
        );
        assert_eq!(
            task.output_template().file_name().unwrap(),
            "123456789_Zelda_Run.%(ext)s"
        );
    }

    #[test]
    fn type_marker_is_stripped_from_paths() {
        let planner = PathPlanner::with_root(Path::new("vods"), ".mkv", 100);
        let mut rec = zelda();
        rec.id = "v123456789".to_string();
        let task = planner.task_for(&rec);
        assert_eq!(task.id, "123456789");
        assert!(task.media_path.ends_with("123456789_Zelda_Run.mkv"));
    }

    #[test]
    fn same_record_same_path() {
        let planner = PathPlanner::with_root(Path::new("/a"), "mp4", 100);
        assert_eq!(planner.task_for(&zelda()), planner.task_for(&zelda()));
    }

    #[test]
    fn existing_media_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let planner = PathPlanner::with_root(dir.path(), "mp4", 100);
        let task = match planner.plan(&zelda()) {
            Plan::Download(t) => t,
            other => panic!("expected download, got {other:?}"),
        };
        std::fs::create_dir_all(&task.folder).unwrap();
        std::fs::write(&task.media_path, b"x").unwrap();
        assert_eq!(
            planner.plan(&zelda()),
            Plan::Skip(SkipReason::AlreadyDownloaded {
                media_path: task.media_path.clone()
            })
        );
    }

    #[test]
    fn sidecars_alone_do_not_count_as_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let planner = PathPlanner::with_root(dir.path(), "mp4", 100);
        let task = planner.task_for(&zelda());
        std::fs::create_dir_all(&task.folder).unwrap();
        std::fs::write(task.sidecar_path(), b"{}").unwrap();
        std::fs::write(task.summary_path(), b"ID: 1").unwrap();
        assert!(matches!(planner.plan(&zelda()), Plan::Download(_)));
    }
}
