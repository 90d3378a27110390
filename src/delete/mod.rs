//! Deletion side effects.
//!
//! The orchestrator only hands over `{pane, ids}`; a `DeleteCollaborator`
//! performs the deletion and reports whether one is still pending.

pub mod trash;

use crate::models::{MediaId, Pane};

pub use trash::TrashDeleter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub pane: Pane,
    pub ids: Vec<MediaId>,
}

/// What happened to a confirmed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub pane: Pane,
    pub moved: Vec<MediaId>,
    pub failed: Vec<(MediaId, String)>,
}

pub trait DeleteCollaborator {
    /// Fire-and-forget: completion is signalled out of band.
    fn delete(&self, request: DeleteRequest);

    fn is_pending(&self) -> bool;
}
