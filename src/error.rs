use std::path::PathBuf;

use thiserror::Error;

/// Why an id-list fetch for a pane failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("fetch task failed: {0}")]
    Join(String),

    #[error("{0}")]
    Source(String),
}

/// Failure while moving one item into the trash.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("could not determine a trash directory")]
    TrashUnavailable,

    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("failed to move {} to trash: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
