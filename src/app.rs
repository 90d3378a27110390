//! Headless session driver.
//!
//! Owns the orchestrator together with the fetch queue and the trash
//! deleter, and pumps events between them the way a UI main loop would.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;
use crate::delete::TrashDeleter;
use crate::fetch::{FetchQueue, FetchResult, MediaSource};
use crate::layout::{DeviceClass, WheelQuantizer};
use crate::models::{Pane, PerPane};
use crate::panes::{OrchestratorEvent, PaneOrchestrator};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub struct BrowserApp {
    orchestrator: PaneOrchestrator,
    fetches: FetchQueue,
    deleter: TrashDeleter,
    wheel: PerPane<WheelQuantizer>,
    window: (f32, f32),
    previews: Vec<PathBuf>,
}

impl BrowserApp {
    pub fn new(
        config: BrowserConfig,
        source: Arc<dyn MediaSource>,
        deleter: TrashDeleter,
        runtime: Handle,
    ) -> Self {
        let wheel = PerPane::splat(WheelQuantizer::new(config.zoom_step_units));
        Self {
            orchestrator: PaneOrchestrator::new(config),
            fetches: FetchQueue::new(source, runtime),
            deleter,
            wheel,
            window: (0.0, 0.0),
            previews: Vec::new(),
        }
    }

    pub fn orchestrator(&self) -> &PaneOrchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut PaneOrchestrator {
        &mut self.orchestrator
    }

    /// Paths the user asked to preview, oldest first.
    pub fn previews(&self) -> &[PathBuf] {
        &self.previews
    }

    /// Window resize: updates the device class and both pane viewports.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window = (width.max(0.0), height.max(0.0));
        self.orchestrator.set_viewport_width(self.window.0);
        self.layout_panes();
    }

    /// Raw wheel/pinch delta over a pane.
    pub fn wheel(&mut self, pane: Pane, delta: f32) {
        let steps = self.wheel.get_mut(pane).feed(delta);
        if steps != 0 {
            self.orchestrator.zoom(pane, steps);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<usize> {
        self.orchestrator.confirm_delete(&self.deleter)
    }

    /// Handles queued events and finished background work. Returns the
    /// number of items processed.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;

        for event in self.orchestrator.drain_events() {
            handled += 1;
            match event {
                OrchestratorEvent::FetchRequested(request) => {
                    self.fetches.request(request);
                }
                OrchestratorEvent::ViewModeChanged(mode) => {
                    debug!(?mode, "View mode changed");
                    self.layout_panes();
                }
                OrchestratorEvent::ColumnsChanged(change) => {
                    debug!(pane = %change.pane, columns = change.columns, "Columns changed");
                }
                OrchestratorEvent::PreviewRequested { pane, id } => {
                    info!(%pane, %id, "Preview requested");
                    self.previews.push(PathBuf::from(id.as_str()));
                }
                OrchestratorEvent::DeleteConfirmed { pane, count } => {
                    debug!(%pane, count, "Deletion handed to trash");
                }
            }
        }

        for result in self.fetches.poll_results() {
            handled += 1;
            self.apply_fetch(result);
        }

        for outcome in self.deleter.poll_outcomes() {
            handled += 1;
            if !outcome.failed.is_empty() {
                warn!(
                    pane = %outcome.pane,
                    failed = outcome.failed.len(),
                    "Some items could not be deleted"
                );
            }
            self.orchestrator.delete_finished(outcome.pane);
        }

        handled
    }

    /// Nothing is loading and no deletion is waiting for its outcome.
    pub fn is_idle(&self) -> bool {
        let loading = Pane::ALL.into_iter().any(|pane| {
            self.orchestrator.pane(pane).is_loading() || self.fetches.is_pending(pane)
        });
        let deleting = self
            .orchestrator
            .delete_dialog()
            .is_some_and(|dialog| dialog.dispatched);
        !loading && !deleting
    }

    /// Pumps until idle or until `timeout` elapses. Returns false on
    /// timeout.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.pump();
            if self.is_idle() {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(?timeout, "Timed out waiting for background work");
                return false;
            }
            if let Some(result) = self.fetches.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
                self.apply_fetch(result);
            }
        }
    }

    fn apply_fetch(&mut self, result: FetchResult) {
        debug!(
            pane = %result.pane(),
            generation = result.generation,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Fetch finished"
        );
        self.orchestrator.apply_fetch(result.request.pane, result.outcome);
    }

    /// Splits the window between the visible panes: side by side on
    /// desktop, stacked on mobile.
    fn layout_panes(&mut self) {
        let (width, height) = self.window;
        let active = self.orchestrator.active_view_mode();
        let (pane_width, pane_height) = match (active.is_split(), self.orchestrator.device()) {
            (false, _) => (width, height),
            (true, DeviceClass::Desktop) => (width / 2.0, height),
            (true, DeviceClass::Mobile) => (width, height / 2.0),
        };
        for pane in Pane::ALL {
            if active.is_visible(pane) {
                self.orchestrator
                    .set_pane_viewport(pane, pane_width, pane_height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::DirectorySource;
    use crate::models::MediaId;
    use crate::panes::PaneContent;
    use std::fs::File;
    use tempfile::tempdir;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn app(rt: &tokio::runtime::Runtime, trash: PathBuf) -> BrowserApp {
        BrowserApp::new(
            BrowserConfig::default(),
            Arc::new(DirectorySource::new()),
            TrashDeleter::new(trash, rt.handle().clone()),
            rt.handle().clone(),
        )
    }

    #[test]
    fn test_loads_both_panes() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        let trash = tempdir().unwrap();
        for name in ["a.jpg", "b.png", "c.mp4"] {
            File::create(source.path().join(name)).unwrap();
        }

        let mut app = app(&rt, trash.path().to_path_buf());
        app.resize(1200.0, 800.0);
        app.orchestrator_mut()
            .set_directory(Pane::Source, source.path());
        app.orchestrator_mut()
            .set_directory(Pane::Destination, destination.path());
        assert!(app.wait_until_idle(TIMEOUT));

        let src = app.orchestrator().pane_view(Pane::Source);
        assert_eq!(src.total_count, 3);
        assert_eq!(src.photo_count, 2);
        assert_eq!(src.video_count, 1);
        let dst = app.orchestrator().pane_view(Pane::Destination);
        assert_eq!(dst.content, PaneContent::Empty);
        assert_eq!(app.orchestrator().pane(Pane::Source).viewport.width, 600.0);
    }

    #[test]
    fn test_missing_directory_fails_pane() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let trash = tempdir().unwrap();
        let mut app = app(&rt, trash.path().to_path_buf());
        app.orchestrator_mut()
            .set_directory(Pane::Destination, "/definitely/not/here");
        assert!(app.wait_until_idle(TIMEOUT));
        assert!(matches!(
            app.orchestrator().pane_view(Pane::Destination).content,
            PaneContent::Failed { .. }
        ));
    }

    #[test]
    fn test_delete_round_trip_refetches() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let source = tempdir().unwrap();
        let trash = tempdir().unwrap();
        for name in ["a.jpg", "b.jpg"] {
            File::create(source.path().join(name)).unwrap();
        }

        let mut app = app(&rt, trash.path().to_path_buf());
        app.orchestrator_mut()
            .set_directory(Pane::Source, source.path());
        assert!(app.wait_until_idle(TIMEOUT));

        let doomed = MediaId::new(source.path().join("a.jpg").to_string_lossy());
        assert!(app.orchestrator_mut().select_id(Pane::Source, &doomed));
        app.orchestrator_mut().request_delete(Pane::Source).unwrap();
        assert_eq!(app.confirm_delete(), Some(1));
        assert!(app.wait_until_idle(TIMEOUT));

        let state = app.orchestrator().pane(Pane::Source);
        assert_eq!(state.ids.len(), 1);
        assert!(state.selection.is_empty());
        assert!(app.orchestrator().delete_dialog().is_none());
        assert!(trash.path().join("a.jpg").exists());
    }

    #[test]
    fn test_wheel_zooms_in_whole_steps() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let trash = tempdir().unwrap();
        let mut app = app(&rt, trash.path().to_path_buf());
        app.resize(1600.0, 900.0);

        app.wheel(Pane::Source, 60.0);
        assert_eq!(app.orchestrator().column_count(Pane::Source), 5);
        app.wheel(Pane::Source, 60.0);
        assert_eq!(app.orchestrator().column_count(Pane::Source), 4);
        assert_eq!(app.orchestrator().column_count(Pane::Destination), 5);
    }

    #[test]
    fn test_maximize_relayouts_viewports() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let trash = tempdir().unwrap();
        let mut app = app(&rt, trash.path().to_path_buf());
        app.resize(1000.0, 700.0);
        assert_eq!(app.orchestrator().pane(Pane::Source).viewport.width, 500.0);

        app.orchestrator_mut().toggle_maximize(Pane::Source);
        app.pump();
        assert_eq!(app.orchestrator().pane(Pane::Source).viewport.width, 1000.0);

        app.resize(500.0, 700.0);
        app.orchestrator_mut().toggle_maximize(Pane::Source);
        app.pump();
        let viewport = app.orchestrator().pane(Pane::Destination).viewport;
        assert_eq!((viewport.width, viewport.height), (500.0, 350.0));
    }
}
