//! Local directory listing as a media source.
//!
//! Walks the requested directory with walkdir, keeps files whose extension
//! maps to a media type accepted by the pane's filter, and returns their
//! full paths as ids in sorted order.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{FetchRequest, MediaSource};
use crate::error::FetchError;
use crate::models::{MediaId, MediaType};

/// Configuration for directory scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to scan directories recursively.
    pub recursive: bool,
    /// Maximum directory depth (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
    /// Whether dot-files and dot-directories are listed.
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: 0, // unlimited
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DirectorySource {
    config: ScanConfig,
}

impl DirectorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    fn walker(&self, dir: &Path) -> WalkDir {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks);

        if !self.config.recursive {
            walker = walker.max_depth(1);
        } else if self.config.max_depth > 0 {
            walker = walker.max_depth(self.config.max_depth);
        }
        walker
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }
}

impl MediaSource for DirectorySource {
    fn list_media(&self, request: &FetchRequest) -> Result<Vec<MediaId>, FetchError> {
        let dir = request.directory.as_path();
        if !dir.exists() {
            return Err(FetchError::MissingDirectory(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(FetchError::NotADirectory(dir.to_path_buf()));
        }

        let include_hidden = self.config.include_hidden;
        let mut ids = Vec::new();
        let mut skipped = 0usize;

        let entries = self
            .walker(dir)
            .into_iter()
            .filter_entry(|e| include_hidden || !Self::is_hidden(e));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(FetchError::Walk {
                        path: dir.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    skipped += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(media_type) = MediaType::from_path(entry.path()) else {
                continue;
            };
            if !request.filter.accepts(media_type) {
                continue;
            }

            ids.push(MediaId::new(entry.path().to_string_lossy()));
        }

        ids.sort();
        debug!(
            pane = %request.pane,
            directory = ?dir,
            count = ids.len(),
            skipped,
            "Listed directory"
        );
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaFilter, Pane};
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn request(dir: &Path, filter: MediaFilter) -> FetchRequest {
        FetchRequest {
            pane: Pane::Source,
            directory: dir.to_path_buf(),
            filter,
        }
    }

    fn names(ids: &[MediaId]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                Path::new(id.as_str())
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();
        assert!(config.recursive);
        assert_eq!(config.max_depth, 0);
        assert!(!config.follow_symlinks);
        assert!(!config.include_hidden);
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempdir().unwrap();
        let ids = DirectorySource::new()
            .list_media(&request(dir.path(), MediaFilter::All))
            .unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_lists_sorted_media_only() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.png")).unwrap();
        File::create(dir.path().join("a.jpg")).unwrap();
        File::create(dir.path().join("clip.mp4")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let ids = DirectorySource::new()
            .list_media(&request(dir.path(), MediaFilter::All))
            .unwrap();
        assert_eq!(names(&ids), vec!["a.jpg", "b.png", "clip.mp4"]);
    }

    #[test]
    fn test_filter_applied() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.jpg")).unwrap();
        File::create(dir.path().join("clip.mp4")).unwrap();

        let source = DirectorySource::new();
        let photos = source
            .list_media(&request(dir.path(), MediaFilter::Photos))
            .unwrap();
        assert_eq!(names(&photos), vec!["a.jpg"]);
        let videos = source
            .list_media(&request(dir.path(), MediaFilter::Videos))
            .unwrap();
        assert_eq!(names(&videos), vec!["clip.mp4"]);
    }

    #[test]
    fn test_recursive_and_hidden() {
        let dir = tempdir().unwrap();
        let subdir = dir.path().join("subdir");
        let hidden = dir.path().join(".thumbs");
        fs::create_dir(&subdir).unwrap();
        fs::create_dir(&hidden).unwrap();
        File::create(dir.path().join("root.png")).unwrap();
        File::create(subdir.join("nested.png")).unwrap();
        File::create(hidden.join("cached.png")).unwrap();

        let all = DirectorySource::new()
            .list_media(&request(dir.path(), MediaFilter::All))
            .unwrap();
        assert_eq!(all.len(), 2);

        let flat = DirectorySource::with_config(ScanConfig {
            recursive: false,
            ..Default::default()
        })
        .list_media(&request(dir.path(), MediaFilter::All))
        .unwrap();
        assert_eq!(names(&flat), vec!["root.png"]);

        let with_hidden = DirectorySource::with_config(ScanConfig {
            include_hidden: true,
            ..Default::default()
        })
        .list_media(&request(dir.path(), MediaFilter::All))
        .unwrap();
        assert_eq!(with_hidden.len(), 3);
    }

    #[test]
    fn test_missing_and_non_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = DirectorySource::new()
            .list_media(&request(&missing, MediaFilter::All))
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingDirectory(_)));

        let file = dir.path().join("a.jpg");
        File::create(&file).unwrap();
        let err = DirectorySource::new()
            .list_media(&request(&file, MediaFilter::All))
            .unwrap_err();
        assert!(matches!(err, FetchError::NotADirectory(_)));
    }
}
