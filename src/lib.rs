//! Headless core of a dual-pane media browser.
//!
//! Two panes (source and destination) each hold an ordered list of media
//! ids, a selection and a column count. [`panes::PaneOrchestrator`] ties
//! them together with the shared view mode and turns the state into
//! [`panes::PaneView`]s that a renderer mounts cell by cell.

pub mod app;
pub mod config;
pub mod delete;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod models;
pub mod panes;
pub mod report;

pub use config::BrowserConfig;
pub use panes::{PaneOrchestrator, PaneView};
