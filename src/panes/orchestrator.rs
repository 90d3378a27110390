//! Composes selection, column layout, grid mapping and view mode for the
//! two panes.
//!
//! All operations are synchronous and total: each one leaves the browser in
//! a consistent state before returning. Side effects the host must carry out
//! (fetching, previewing) are queued as [`OrchestratorEvent`]s and collected
//! with [`PaneOrchestrator::drain_events`].

use std::path::PathBuf;

use tracing::{debug, info, trace, warn};

use super::state::{LoadState, PaneState, PaneViewport};
use super::view::{CellView, DeleteDialog, GridView, PaneContent, PaneView};
use super::view_mode::{ActiveViewMode, MobileViewMode, ViewModeController};
use crate::config::BrowserConfig;
use crate::delete::{DeleteCollaborator, DeleteRequest};
use crate::error::FetchError;
use crate::fetch::FetchRequest;
use crate::layout::{ColumnLayoutEngine, ColumnsChanged, DeviceClass, VirtualGridMapper};
use crate::models::{MediaFilter, MediaId, Pane, PerPane};

#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorEvent {
    ColumnsChanged(ColumnsChanged),
    ViewModeChanged(ActiveViewMode),
    FetchRequested(FetchRequest),
    PreviewRequested { pane: Pane, id: MediaId },
    DeleteConfirmed { pane: Pane, count: usize },
}

pub struct PaneOrchestrator {
    config: BrowserConfig,
    panes: PerPane<PaneState>,
    columns: ColumnLayoutEngine,
    view_mode: ViewModeController,
    delete_dialog: Option<DeleteDialog>,
    events: Vec<OrchestratorEvent>,
}

impl PaneOrchestrator {
    pub fn new(config: BrowserConfig) -> Self {
        let view_mode = ViewModeController::new();
        let split = view_mode.active(DeviceClass::Desktop).is_split();
        let columns = ColumnLayoutEngine::new(&config, split);
        Self {
            config,
            panes: PerPane::new(
                PaneState::new(Pane::Source),
                PaneState::new(Pane::Destination),
            ),
            columns,
            view_mode,
            delete_dialog: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn device(&self) -> DeviceClass {
        self.columns.device()
    }

    pub fn active_view_mode(&self) -> ActiveViewMode {
        self.view_mode.active(self.device())
    }

    pub fn view_mode(&self) -> &ViewModeController {
        &self.view_mode
    }

    pub fn pane(&self, pane: Pane) -> &PaneState {
        self.panes.get(pane)
    }

    pub fn column_count(&self, pane: Pane) -> u32 {
        self.columns.column_count(pane)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles `id` in the pane's selection. Ids not in the current list
    /// are ignored.
    pub fn select_id(&mut self, pane: Pane, id: &MediaId) -> bool {
        let state = self.panes.get_mut(pane);
        let toggled = state.selection.toggle(id, &state.ids);
        if !toggled {
            trace!(%pane, %id, "Ignoring selection of unlisted id");
        }
        toggled
    }

    pub fn select_all(&mut self, pane: Pane) {
        let state = self.panes.get_mut(pane);
        state.selection.select_all(&state.ids);
        debug!(%pane, selected = state.selection.len(), "Select-all toggled");
    }

    pub fn clear_selection(&mut self, pane: Pane) {
        self.panes.get_mut(pane).selection.clear();
    }

    pub fn is_selected(&self, pane: Pane, id: &MediaId) -> bool {
        self.panes.get(pane).selection.is_selected(id)
    }

    // =========================================================================
    // Columns and view mode
    // =========================================================================

    pub fn set_column_count(&mut self, pane: Pane, columns: i64) -> Option<ColumnsChanged> {
        let change = self.columns.set_column_count(pane, columns);
        self.push_column_change(change);
        change
    }

    pub fn zoom(&mut self, pane: Pane, steps: i32) -> Option<ColumnsChanged> {
        let change = self.columns.zoom(pane, steps);
        self.push_column_change(change);
        change
    }

    /// Maximize toggle, routed to the desktop or mobile machine by the
    /// current device class.
    pub fn toggle_maximize(&mut self, pane: Pane) -> ActiveViewMode {
        let before = self.active_view_mode();
        let after = self.view_mode.toggle_maximize(pane, self.device());
        self.after_view_change(before);
        after
    }

    /// Mobile three-way selector. Also remembered while on desktop.
    pub fn select_mobile_view(&mut self, mode: MobileViewMode) {
        let before = self.active_view_mode();
        self.view_mode.select_mobile(mode);
        self.after_view_change(before);
    }

    /// Window width changed: re-derives the device class.
    pub fn set_viewport_width(&mut self, width: f32) {
        let before = self.active_view_mode();
        if self.columns.set_viewport_width(width, self.config.breakpoint_px) {
            self.after_view_change(before);
        }
    }

    pub fn set_pane_viewport(&mut self, pane: Pane, width: f32, height: f32) {
        let state = self.panes.get_mut(pane);
        state.viewport = PaneViewport {
            width: width.max(0.0),
            height: height.max(0.0),
        };
        self.clamp_scroll(pane);
    }

    /// Non-finite offsets are ignored.
    pub fn scroll_to(&mut self, pane: Pane, offset: f32) {
        if !offset.is_finite() {
            trace!(%pane, offset, "Ignoring non-finite scroll offset");
            return;
        }
        self.panes.get_mut(pane).scroll_offset = offset;
        self.clamp_scroll(pane);
    }

    pub fn toggle_dates(&mut self, pane: Pane) -> bool {
        let state = self.panes.get_mut(pane);
        state.show_dates = !state.show_dates;
        state.show_dates
    }

    /// Queues a preview of a listed item.
    pub fn preview(&mut self, pane: Pane, id: &MediaId) {
        if self.panes.get(pane).contains(id) {
            self.events.push(OrchestratorEvent::PreviewRequested {
                pane,
                id: id.clone(),
            });
        }
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    pub fn set_directory(&mut self, pane: Pane, directory: impl Into<PathBuf>) {
        self.panes.get_mut(pane).directory = Some(directory.into());
        self.begin_fetch(pane);
    }

    pub fn set_filter(&mut self, pane: Pane, filter: MediaFilter) {
        let state = self.panes.get_mut(pane);
        if state.filter == filter {
            return;
        }
        state.filter = filter;
        self.begin_fetch(pane);
    }

    /// Marks the pane as loading and queues a fetch for its current
    /// directory and filter. No-op until a directory is set.
    pub fn begin_fetch(&mut self, pane: Pane) {
        let state = self.panes.get_mut(pane);
        let Some(directory) = state.directory.clone() else {
            return;
        };
        state.load = LoadState::Loading;
        self.events
            .push(OrchestratorEvent::FetchRequested(FetchRequest {
                pane,
                directory,
                filter: state.filter,
            }));
    }

    /// Applies a fetch result. Success replaces the list (pruning stale
    /// selections); failure keeps list, selection and columns untouched.
    pub fn apply_fetch(&mut self, pane: Pane, outcome: Result<Vec<MediaId>, FetchError>) {
        let state = self.panes.get_mut(pane);
        match outcome {
            Ok(ids) => {
                let count = ids.len();
                let replaced = state.replace_ids(ids);
                if replaced.pruned > 0 {
                    debug!(%pane, pruned = replaced.pruned, "Pruned stale selections");
                }
                info!(%pane, count, unchanged = replaced.unchanged, "Media list loaded");
                self.clamp_scroll(pane);
                self.sync_delete_dialog(pane);
            }
            Err(e) => {
                warn!(%pane, error = %e, "Media list fetch failed");
                state.fail(e.to_string());
            }
        }
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Opens the delete confirmation for the pane's selection. Returns
    /// `None` when nothing is selected or a deletion is already dispatched.
    pub fn request_delete(&mut self, pane: Pane) -> Option<DeleteDialog> {
        if self.delete_dialog.as_ref().is_some_and(|d| d.dispatched) {
            return None;
        }

        let count = self.panes.get(pane).selection.len();
        if count == 0 {
            return None;
        }

        let dialog = DeleteDialog::new(pane, count);
        self.delete_dialog = Some(dialog.clone());
        Some(dialog)
    }

    pub fn delete_dialog(&self) -> Option<&DeleteDialog> {
        self.delete_dialog.as_ref()
    }

    /// Closes an undispatched confirmation.
    pub fn cancel_delete(&mut self) -> bool {
        match &self.delete_dialog {
            Some(dialog) if !dialog.dispatched => {
                self.delete_dialog = None;
                true
            }
            _ => false,
        }
    }

    /// Hands the pane's selection, as it is now, to `collaborator`. The ids
    /// stay listed until the refresh that follows [`Self::delete_finished`].
    pub fn confirm_delete(&mut self, collaborator: &dyn DeleteCollaborator) -> Option<usize> {
        if collaborator.is_pending() {
            return None;
        }
        let dialog = self.delete_dialog.as_ref()?;
        if dialog.dispatched {
            return None;
        }

        let pane = dialog.pane;
        let state = self.panes.get(pane);
        let ids = state.selection.snapshot(&state.ids);
        if ids.is_empty() {
            debug!(%pane, "Selection emptied before confirmation");
            self.delete_dialog = None;
            return None;
        }

        let count = ids.len();
        let mut dialog = DeleteDialog::new(pane, count);
        dialog.dispatched = true;
        self.delete_dialog = Some(dialog);
        collaborator.delete(DeleteRequest { pane, ids });
        info!(%pane, count, "Deletion confirmed");
        self.events
            .push(OrchestratorEvent::DeleteConfirmed { pane, count });
        Some(count)
    }

    /// The collaborator finished: close the dialog and reload the pane.
    pub fn delete_finished(&mut self, pane: Pane) {
        if self.delete_dialog.as_ref().is_some_and(|d| d.pane == pane) {
            self.delete_dialog = None;
        }
        self.begin_fetch(pane);
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn drain_events(&mut self) -> Vec<OrchestratorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pane_view(&self, pane: Pane) -> PaneView {
        let active = self.active_view_mode();
        let state = self.panes.get(pane);
        let effective = self.columns.effective(pane);
        let visible = active.is_visible(pane);

        let content = if !visible {
            PaneContent::Hidden
        } else {
            match &state.load {
                LoadState::Loading => PaneContent::Loading {
                    columns: effective.columns,
                },
                LoadState::Failed(message) => PaneContent::Failed {
                    message: message.clone(),
                },
                LoadState::Ready if state.ids.is_empty() => PaneContent::Empty,
                LoadState::Ready => {
                    PaneContent::Grid(self.grid_view(state, effective.columns, effective.gap))
                }
            }
        };

        PaneView {
            pane,
            title: pane.title(),
            visible,
            maximized: active.is_maximized(pane),
            split: active.is_split(),
            columns: effective.columns,
            gap: effective.gap,
            compact: effective.compact,
            selected_count: state.selection.len(),
            total_count: state.ids.len(),
            photo_count: state.counts.photos,
            video_count: state.counts.videos,
            all_selected: !state.ids.is_empty() && state.selection.covers_exactly(&state.ids),
            show_dates: state.show_dates,
            content,
        }
    }

    fn grid_view(&self, state: &PaneState, columns: u32, gap: f32) -> GridView {
        let mapper = VirtualGridMapper::new(&state.ids, columns, gap);
        let geometry = mapper.geometry(state.viewport.width);
        let row_count = mapper.row_count();
        let windowed = state.ids.len() > self.config.full_render_max;

        let rows = if windowed {
            geometry.visible_rows(
                state.scroll_offset,
                state.viewport.height,
                self.config.overscan_rows as usize,
                row_count,
            )
        } else {
            0..row_count
        };

        let cells = mapper
            .cells_in_rows(rows.clone())
            .filter_map(|cell| {
                let id = cell.media?;
                Some(CellView {
                    id: id.clone(),
                    pane: state.pane,
                    index: cell.index,
                    row: cell.row,
                    column: cell.column,
                    selected: state.selection.is_selected(id),
                    is_last_column: cell.is_last_column,
                    show_dates: state.show_dates,
                    rect: geometry.rect(cell.row, cell.column),
                })
            })
            .collect();

        GridView {
            row_count,
            content_height: geometry.content_height(row_count),
            tile_size: geometry.tile,
            windowed,
            first_row: rows.start,
            end_row: rows.end,
            cells,
        }
    }

    /// Keeps an open confirmation in step with a selection that a list
    /// replace may have pruned.
    fn sync_delete_dialog(&mut self, pane: Pane) {
        let Some(dialog) = &self.delete_dialog else {
            return;
        };
        if dialog.pane != pane || dialog.dispatched {
            return;
        }
        let count = self.panes.get(pane).selection.len();
        if count == dialog.count {
            return;
        }
        if count == 0 {
            debug!(%pane, "Closing delete confirmation, nothing left selected");
            self.delete_dialog = None;
        } else {
            self.delete_dialog = Some(DeleteDialog::new(pane, count));
        }
    }

    fn push_column_change(&mut self, change: Option<ColumnsChanged>) {
        if let Some(change) = change {
            self.events.push(OrchestratorEvent::ColumnsChanged(change));
        }
    }

    /// Re-clamps column bounds and announces a new active view mode.
    fn after_view_change(&mut self, before: ActiveViewMode) {
        let after = self.active_view_mode();
        if after == before {
            return;
        }
        debug!(?before, ?after, "Active view mode changed");
        self.events.push(OrchestratorEvent::ViewModeChanged(after));
        for change in self.columns.set_split(after.is_split()) {
            self.events.push(OrchestratorEvent::ColumnsChanged(change));
        }
        for pane in Pane::ALL {
            self.clamp_scroll(pane);
        }
    }

    fn clamp_scroll(&mut self, pane: Pane) {
        let effective = self.columns.effective(pane);
        let state = self.panes.get_mut(pane);
        let mapper = VirtualGridMapper::new(&state.ids, effective.columns, effective.gap);
        let content = mapper
            .geometry(state.viewport.width)
            .content_height(mapper.row_count());
        let max_scroll = (content - state.viewport.height).max(0.0);
        state.scroll_offset = state.scroll_offset.clamp(0.0, max_scroll);
    }
}
