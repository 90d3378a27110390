//! The two-pane browser state: per-pane lists and selections, shared view
//! mode, and the view-models handed to the renderer.

pub mod orchestrator;
pub mod state;
pub mod view;
pub mod view_mode;

pub use orchestrator::{OrchestratorEvent, PaneOrchestrator};
pub use state::{LoadState, PaneState, PaneViewport, ReplaceOutcome};
pub use view::{CellView, DeleteDialog, GridView, PaneContent, PaneView};
pub use view_mode::{ActiveViewMode, DesktopViewMode, MobileViewMode, ViewModeController};
