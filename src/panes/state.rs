use std::path::PathBuf;

use xxhash_rust::xxh3::xxh3_64;

use crate::models::{MediaCounts, MediaFilter, MediaId, Pane, SelectionSet};

/// Where a pane's id list stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Pixel size of a pane's scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaneViewport {
    pub width: f32,
    pub height: f32,
}

/// Result of replacing a pane's id list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// The new list was identical to the current one.
    pub unchanged: bool,
    /// Selected ids dropped because they are no longer listed.
    pub pruned: usize,
}

/// Everything one pane owns. Nothing here is shared with the other pane.
#[derive(Debug, Clone)]
pub struct PaneState {
    pub pane: Pane,
    /// Directory being listed; `None` until one is chosen.
    pub directory: Option<PathBuf>,
    pub filter: MediaFilter,
    /// Ordered ids from the last successful fetch.
    pub ids: Vec<MediaId>,
    /// Photo/video totals of `ids`.
    pub counts: MediaCounts,
    /// Always a subset of `ids`.
    pub selection: SelectionSet,
    pub load: LoadState,
    /// Show capture dates on tiles.
    pub show_dates: bool,
    /// Size of the scroll container in pixels.
    pub viewport: PaneViewport,
    /// Vertical scroll position, clamped to the content height.
    pub scroll_offset: f32,
    /// Hash of `ids`, used to skip identical replaces.
    fingerprint: u64,
}

impl PaneState {
    pub fn new(pane: Pane) -> Self {
        Self {
            pane,
            directory: None,
            filter: MediaFilter::All,
            ids: Vec::new(),
            counts: MediaCounts::default(),
            selection: SelectionSet::new(),
            load: LoadState::Ready,
            show_dates: false,
            viewport: PaneViewport::default(),
            scroll_offset: 0.0,
            fingerprint: list_fingerprint(&[]),
        }
    }

    /// Replaces the list wholesale and prunes the selection to it. Column
    /// state lives elsewhere and is untouched.
    pub fn replace_ids(&mut self, ids: Vec<MediaId>) -> ReplaceOutcome {
        self.load = LoadState::Ready;

        let fingerprint = list_fingerprint(&ids);
        if fingerprint == self.fingerprint && ids == self.ids {
            return ReplaceOutcome {
                unchanged: true,
                pruned: 0,
            };
        }

        self.counts = MediaCounts::tally(&ids);
        self.ids = ids;
        self.fingerprint = fingerprint;
        let pruned = self.selection.retain_known(&self.ids);
        ReplaceOutcome {
            unchanged: false,
            pruned,
        }
    }

    /// Keeps the previous list and selection; only the load state changes.
    pub fn fail(&mut self, message: String) {
        self.load = LoadState::Failed(message);
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn contains(&self, id: &MediaId) -> bool {
        self.ids.contains(id)
    }
}

/// Fast order-sensitive hash of an id list.
pub fn list_fingerprint(ids: &[MediaId]) -> u64 {
    let mut input = Vec::with_capacity(ids.len() * 32);
    for id in ids {
        input.extend_from_slice(id.as_str().as_bytes());
        input.push(0);
    }
    xxh3_64(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<MediaId> {
        names.iter().map(|n| MediaId::from(*n)).collect()
    }

    #[test]
    fn test_fingerprint_order_sensitive() {
        assert_eq!(list_fingerprint(&ids(&["a", "b"])), list_fingerprint(&ids(&["a", "b"])));
        assert_ne!(list_fingerprint(&ids(&["a", "b"])), list_fingerprint(&ids(&["b", "a"])));
        assert_ne!(list_fingerprint(&ids(&["ab"])), list_fingerprint(&ids(&["a", "b"])));
    }

    #[test]
    fn test_replace_prunes_selection() {
        let mut state = PaneState::new(Pane::Source);
        state.replace_ids(ids(&["a.jpg", "b.jpg", "c.mp4"]));
        let list = state.ids.clone();
        state.selection.select_all(&list);
        assert_eq!(state.counts, MediaCounts { photos: 2, videos: 1 });

        let outcome = state.replace_ids(ids(&["b.jpg"]));
        assert_eq!(
            outcome,
            ReplaceOutcome {
                unchanged: false,
                pruned: 2
            }
        );
        assert_eq!(state.selection.len(), 1);
        assert_eq!(state.counts, MediaCounts { photos: 1, videos: 0 });
    }

    #[test]
    fn test_identical_replace_is_unchanged() {
        let mut state = PaneState::new(Pane::Destination);
        state.replace_ids(ids(&["a", "b"]));
        state.load = LoadState::Loading;
        let outcome = state.replace_ids(ids(&["a", "b"]));
        assert!(outcome.unchanged);
        assert_eq!(state.load, LoadState::Ready);
    }

    #[test]
    fn test_fail_keeps_list_and_selection() {
        let mut state = PaneState::new(Pane::Source);
        state.replace_ids(ids(&["a", "b"]));
        let list = state.ids.clone();
        state.selection.toggle(&list[0], &list);

        state.fail("offline".into());
        assert_eq!(state.load, LoadState::Failed("offline".into()));
        assert_eq!(state.ids.len(), 2);
        assert_eq!(state.selection.len(), 1);
    }
}
