//! Id-list retrieval for the panes.
//!
//! - `MediaSource` - the collaborator that lists ids for a directory + filter
//! - `FetchQueue` - runs fetches off the event loop, one generation per pane
//! - `DirectorySource` - lists media files under a local directory

pub mod directory;
pub mod queue;

use std::path::PathBuf;

use crate::error::FetchError;
use crate::models::{MediaFilter, MediaId, Pane};

pub use directory::{DirectorySource, ScanConfig};
pub use queue::{FetchQueue, FetchResult};

/// What a pane wants listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub pane: Pane,
    pub directory: PathBuf,
    pub filter: MediaFilter,
}

/// Lists the ordered media ids for a request.
///
/// Implementations may block; the queue always calls them from a blocking
/// task.
pub trait MediaSource: Send + Sync + 'static {
    fn list_media(&self, request: &FetchRequest) -> Result<Vec<MediaId>, FetchError>;
}
