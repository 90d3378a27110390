//! View-models handed to the presentation layer.

use crate::layout::CellRect;
use crate::models::{MediaId, Pane};

/// Everything needed to render one pane.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneView {
    pub pane: Pane,
    /// Header label.
    pub title: &'static str,
    /// Shown by the active view mode.
    pub visible: bool,
    /// Fills the content area on its own.
    pub maximized: bool,
    /// Both panes share the content area.
    pub split: bool,
    /// Effective column count (the compact override when on mobile).
    pub columns: u32,
    /// Gap between tiles in pixels.
    pub gap: f32,
    /// Compact mobile layout is active.
    pub compact: bool,
    pub selected_count: usize,
    pub total_count: usize,
    pub photo_count: usize,
    pub video_count: usize,
    /// Drives the select-all toggle label.
    pub all_selected: bool,
    pub show_dates: bool,
    pub content: PaneContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaneContent {
    /// The active view mode does not show this pane.
    Hidden,
    /// A fetch is in flight: render skeleton tiles in `columns` columns.
    Loading { columns: u32 },
    Failed { message: String },
    Empty,
    Grid(GridView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Rows in the whole grid, mounted or not.
    pub row_count: usize,
    /// Scrollable height of the whole grid in pixels.
    pub content_height: f32,
    /// Edge of a square tile in pixels.
    pub tile_size: f32,
    /// False when the whole list is mounted (small lists).
    pub windowed: bool,
    /// First mounted row.
    pub first_row: usize,
    /// One past the last mounted row.
    pub end_row: usize,
    /// Mounted cells in list order.
    pub cells: Vec<CellView>,
}

/// What the leaf renderer gets for one mounted item.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub id: MediaId,
    pub pane: Pane,
    /// Position of `id` in the pane's list.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub selected: bool,
    /// No gap follows this cell.
    pub is_last_column: bool,
    pub show_dates: bool,
    /// Placement inside the pane's scroll content.
    pub rect: CellRect,
}

/// Confirmation prompt for deleting a pane's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog {
    pub pane: Pane,
    pub count: usize,
    pub title: String,
    /// The request has been handed to the deletion collaborator.
    pub dispatched: bool,
}

impl DeleteDialog {
    pub fn new(pane: Pane, count: usize) -> Self {
        let plural = if count > 1 { "s" } else { "" };
        Self {
            pane,
            count,
            title: format!("Delete {count} item{plural}"),
            dispatched: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_title_plural() {
        assert_eq!(DeleteDialog::new(Pane::Source, 1).title, "Delete 1 item");
        assert_eq!(DeleteDialog::new(Pane::Source, 3).title, "Delete 3 items");
    }
}
