//! Moves deleted media into a trash directory under the application cache
//! (`XDG_CACHE_HOME/duopane/trash/` by default) instead of unlinking them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use directories::ProjectDirs;
use flume::{Receiver, Sender};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::{DeleteCollaborator, DeleteOutcome, DeleteRequest};
use crate::error::DeleteError;

pub struct TrashDeleter {
    trash_dir: PathBuf,
    runtime: Handle,
    pending: Arc<AtomicUsize>,
    outcome_tx: Sender<DeleteOutcome>,
    outcome_rx: Receiver<DeleteOutcome>,
}

impl TrashDeleter {
    /// Trash under the platform cache directory.
    pub fn new_default(runtime: Handle) -> Result<Self, DeleteError> {
        Ok(Self::new(Self::default_trash_dir()?, runtime))
    }

    pub fn new(trash_dir: PathBuf, runtime: Handle) -> Self {
        let (outcome_tx, outcome_rx) = flume::unbounded();
        Self {
            trash_dir,
            runtime,
            pending: Arc::new(AtomicUsize::new(0)),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn default_trash_dir() -> Result<PathBuf, DeleteError> {
        let proj_dirs =
            ProjectDirs::from("", "", "duopane").ok_or(DeleteError::TrashUnavailable)?;
        Ok(proj_dirs.cache_dir().join("trash"))
    }

    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }

    /// Finished deletions, non-blocking.
    pub fn poll_outcomes(&self) -> Vec<DeleteOutcome> {
        self.outcome_rx.try_iter().collect()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<DeleteOutcome> {
        self.outcome_rx
            .recv_deadline(Instant::now() + timeout)
            .ok()
    }
}

impl DeleteCollaborator for TrashDeleter {
    fn delete(&self, request: DeleteRequest) {
        let trash_dir = self.trash_dir.clone();
        let pending = Arc::clone(&self.pending);
        let tx = self.outcome_tx.clone();
        pending.fetch_add(1, Ordering::SeqCst);

        debug!(pane = %request.pane, count = request.ids.len(), "Moving items to trash");

        self.runtime.spawn_blocking(move || {
            let mut outcome = DeleteOutcome {
                pane: request.pane,
                moved: Vec::new(),
                failed: Vec::new(),
            };

            for id in request.ids {
                match move_to_trash(Path::new(id.as_str()), &trash_dir) {
                    Ok(target) => {
                        debug!(?target, "Moved to trash");
                        outcome.moved.push(id);
                    }
                    Err(e) => {
                        warn!(%id, error = %e, "Failed to trash item");
                        outcome.failed.push((id, e.to_string()));
                    }
                }
            }

            info!(
                pane = %outcome.pane,
                moved = outcome.moved.len(),
                failed = outcome.failed.len(),
                "Deletion finished"
            );
            if tx.send(outcome).is_err() {
                warn!("Delete outcome receiver dropped");
            }
            pending.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

/// Moves `path` into `trash_dir`, suffixing the name when it collides with
/// an earlier trashed file. Returns the new location.
pub fn move_to_trash(path: &Path, trash_dir: &Path) -> Result<PathBuf, DeleteError> {
    let io_err = |source| DeleteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| DeleteError::NoFileName(path.to_path_buf()))?;
    fs::create_dir_all(trash_dir).map_err(io_err)?;

    let mut target = trash_dir.join(file_name);
    let mut suffix = 1u32;
    while target.exists() {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = match Path::new(file_name).extension() {
            Some(ext) => format!("{stem}-{suffix}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{suffix}"),
        };
        target = trash_dir.join(name);
        suffix += 1;
    }

    if fs::rename(path, &target).is_err() {
        // Cross-device moves cannot be renamed.
        fs::copy(path, &target).map_err(io_err)?;
        fs::remove_file(path).map_err(io_err)?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaId, Pane};
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_move_to_trash_renames_collisions() {
        let media = tempdir().unwrap();
        let trash = tempdir().unwrap();

        let first = media.path().join("a.jpg");
        File::create(&first).unwrap();
        let target = move_to_trash(&first, trash.path()).unwrap();
        assert_eq!(target, trash.path().join("a.jpg"));
        assert!(!first.exists());

        File::create(&first).unwrap();
        let target = move_to_trash(&first, trash.path()).unwrap();
        assert_eq!(target, trash.path().join("a-1.jpg"));
    }

    #[test]
    fn test_move_missing_file_fails() {
        let trash = tempdir().unwrap();
        let err = move_to_trash(Path::new("/definitely/not/here.jpg"), trash.path()).unwrap_err();
        assert!(matches!(err, DeleteError::Io { .. }));
    }

    #[test]
    fn test_deleter_reports_outcome() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let media = tempdir().unwrap();
        let trash = tempdir().unwrap();
        let present = media.path().join("keep.png");
        File::create(&present).unwrap();

        let deleter = TrashDeleter::new(trash.path().to_path_buf(), rt.handle().clone());
        let present_id = MediaId::new(present.to_string_lossy());
        let missing_id = MediaId::new(media.path().join("gone.png").to_string_lossy());
        deleter.delete(DeleteRequest {
            pane: Pane::Destination,
            ids: vec![present_id.clone(), missing_id.clone()],
        });

        let outcome = deleter.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.pane, Pane::Destination);
        assert_eq!(outcome.moved, vec![present_id]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, missing_id);
        let deadline = Instant::now() + Duration::from_secs(5);
        while deleter.is_pending() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!deleter.is_pending());
        assert!(trash.path().join("keep.png").exists());
    }
}
