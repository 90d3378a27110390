//! Plain-text rendering of pane views for the command line.

use std::fmt::Write;
use std::path::Path;

use crate::models::Pane;
use crate::panes::{CellView, DeleteDialog, GridView, PaneContent, PaneOrchestrator, PaneView};

/// Both panes in order, followed by the delete confirmation when one is
/// open.
pub fn render_session(orchestrator: &PaneOrchestrator) -> String {
    let mut out = String::new();
    for pane in Pane::ALL {
        out.push_str(&render_pane(&orchestrator.pane_view(pane)));
    }
    if let Some(dialog) = orchestrator.delete_dialog() {
        let _ = writeln!(out, "{}", render_dialog(dialog));
    }
    out
}

/// Renders one pane: a header line, the counts line and the mounted grid.
pub fn render_pane(view: &PaneView) -> String {
    let mut out = String::new();

    let mut flags = Vec::new();
    if view.maximized {
        flags.push("maximized");
    }
    if view.compact {
        flags.push("compact");
    }
    if !view.split && view.visible {
        flags.push("single");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    let _ = writeln!(
        out,
        "== {}{} | {} columns, gap {}px ==",
        view.title, flags, view.columns, view.gap
    );

    match &view.content {
        PaneContent::Hidden => {
            let _ = writeln!(out, "  (hidden)");
            return out;
        }
        PaneContent::Loading { columns } => {
            let _ = writeln!(out, "  loading...");
            let skeleton = vec!["[ .... ]"; *columns as usize].join(" ");
            let _ = writeln!(out, "  {skeleton}");
            return out;
        }
        PaneContent::Failed { message } => {
            let _ = writeln!(out, "  error: {message}");
            return out;
        }
        PaneContent::Empty => {
            let _ = writeln!(out, "  no media");
            return out;
        }
        PaneContent::Grid(_) => {}
    }

    let select_label = if view.all_selected {
        "deselect all"
    } else {
        "select all"
    };
    let _ = writeln!(
        out,
        "  {} items ({} photos, {} videos), {} selected <{}>",
        view.total_count, view.photo_count, view.video_count, view.selected_count, select_label
    );

    if let PaneContent::Grid(grid) = &view.content {
        render_grid(&mut out, grid);
    }
    out
}

fn render_grid(out: &mut String, grid: &GridView) {
    let _ = writeln!(
        out,
        "  tile {:.0}px, height {:.0}px, rows {}..{} of {}{}",
        grid.tile_size,
        grid.content_height,
        grid.first_row,
        grid.end_row,
        grid.row_count,
        if grid.windowed { " (windowed)" } else { "" }
    );

    let mut cells = grid.cells.iter().peekable();
    while let Some(first) = cells.next() {
        let row = first.row;
        let mut line = format!("  {:>4} | {}", row, cell_label(first));
        while let Some(cell) = cells.next_if(|c| c.row == row) {
            line.push(' ');
            line.push_str(&cell_label(cell));
        }
        let _ = writeln!(out, "{line}");
    }
}

fn cell_label(cell: &CellView) -> String {
    let id = cell.id.as_str();
    let name = Path::new(id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string());
    if cell.selected {
        format!("[*{name}]")
    } else {
        format!("[{name}]")
    }
}

pub fn render_dialog(dialog: &DeleteDialog) -> String {
    let state = if dialog.dispatched {
        "deleting"
    } else {
        "awaiting confirmation"
    };
    format!("{} from {} ({state})", dialog.title, dialog.pane.title())
}
