//! Per-pane multi-selection.
//!
//! A `SelectionSet` only ever holds ids that are present in the pane's
//! current listing: toggles for unknown ids are ignored, and
//! [`SelectionSet::retain_known`] drops stale ids after a list replace.

use std::collections::HashSet;

use super::MediaId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<MediaId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// Returns false (and changes nothing) when `id` is not in `known`.
    pub fn toggle(&mut self, id: &MediaId, known: &[MediaId]) -> bool {
        if !known.contains(id) {
            return false;
        }
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
        true
    }

    pub fn is_selected(&self, id: &MediaId) -> bool {
        self.ids.contains(id)
    }

    /// Selects every id of `ids`, or clears everything when the whole list
    /// is already selected.
    pub fn select_all(&mut self, ids: &[MediaId]) {
        if self.covers_exactly(ids) {
            self.ids.clear();
            return;
        }
        self.ids.extend(ids.iter().cloned());
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that are no longer listed. Returns how many were removed.
    pub fn retain_known(&mut self, ids: &[MediaId]) -> usize {
        let before = self.ids.len();
        let known: HashSet<&MediaId> = ids.iter().collect();
        self.ids.retain(|id| known.contains(id));
        before - self.ids.len()
    }

    /// True when the selection is exactly the set of `ids`.
    pub fn covers_exactly(&self, ids: &[MediaId]) -> bool {
        self.ids.len() == ids.iter().collect::<HashSet<_>>().len()
            && ids.iter().all(|id| self.ids.contains(id))
    }

    /// Selected ids in listing order.
    pub fn snapshot(&self, ids: &[MediaId]) -> Vec<MediaId> {
        ids.iter()
            .filter(|id| self.ids.contains(*id))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
