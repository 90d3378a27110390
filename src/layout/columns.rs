//! Column-count derivation for both panes.
//!
//! Two drivers feed the engine:
//! - the viewport class: narrow (mobile) viewports get a fixed compact
//!   layout regardless of the explicit count;
//! - zoom steps and explicit sets, clamped to the bounds of the current
//!   view (split or single pane).
//!
//! Change notifications are only produced when a clamped value actually
//! differs from the stored one.

use tracing::{debug, trace};

use crate::config::BrowserConfig;
use crate::models::{Pane, PerPane};

/// Device class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn from_width(viewport_width: f32, breakpoint_px: f32) -> Self {
        if viewport_width < breakpoint_px {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// Inclusive column-count bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBounds {
    pub min: u32,
    pub max: u32,
}

impl ColumnBounds {
    /// `min` is raised to 1 and `max` to `min`.
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn clamp(self, value: i64) -> u32 {
        clamp_columns(value, self.min, self.max)
    }

    pub fn contains(self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Clamps any requested count (including zero or negatives) into `[lo, hi]`.
///
/// `lo` is raised to 1 so the result is always a usable column count.
pub fn clamp_columns(value: i64, lo: u32, hi: u32) -> u32 {
    let lo = lo.max(1);
    let hi = hi.max(lo);
    value.clamp(lo as i64, hi as i64) as u32
}

/// Emitted when a pane's explicit column count changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnsChanged {
    pub pane: Pane,
    pub columns: u32,
}

/// Column count and gap a pane renders with right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveColumns {
    pub columns: u32,
    pub gap: f32,
    pub compact: bool,
}

#[derive(Debug, Clone)]
pub struct ColumnLayoutEngine {
    counts: PerPane<u32>,
    split: bool,
    split_bounds: ColumnBounds,
    single_bounds: ColumnBounds,
    device: DeviceClass,
    gap: f32,
    compact_columns: u32,
    compact_gap: f32,
}

impl ColumnLayoutEngine {
    pub fn new(config: &BrowserConfig, split: bool) -> Self {
        let split_bounds = ColumnBounds::new(config.split_min_columns, config.split_max_columns);
        let single_bounds =
            ColumnBounds::new(config.single_min_columns, config.single_max_columns);
        let initial = (if split { split_bounds } else { single_bounds })
            .clamp(config.default_columns as i64);
        Self {
            counts: PerPane::splat(initial),
            split,
            split_bounds,
            single_bounds,
            device: DeviceClass::Desktop,
            gap: config.gap_px.max(0.0),
            compact_columns: config.compact_columns.max(1),
            compact_gap: config.compact_gap_px.max(0.0),
        }
    }

    /// The explicit (zoom-controlled) count, even while compact.
    pub fn column_count(&self, pane: Pane) -> u32 {
        *self.counts.get(pane)
    }

    /// Bounds of the current view; both panes share them.
    pub fn bounds(&self) -> ColumnBounds {
        if self.split {
            self.split_bounds
        } else {
            self.single_bounds
        }
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn is_compact(&self) -> bool {
        self.device == DeviceClass::Mobile
    }

    pub fn effective(&self, pane: Pane) -> EffectiveColumns {
        if self.is_compact() {
            EffectiveColumns {
                columns: self.compact_columns,
                gap: self.compact_gap,
                compact: true,
            }
        } else {
            EffectiveColumns {
                columns: self.column_count(pane),
                gap: self.gap,
                compact: false,
            }
        }
    }

    /// Sets an explicit count, clamped to the pane's bounds.
    pub fn set_column_count(&mut self, pane: Pane, requested: i64) -> Option<ColumnsChanged> {
        let clamped = self.bounds().clamp(requested);
        if clamped != requested.max(0) as u32 {
            trace!(%pane, requested, clamped, "Column count clamped");
        }
        self.store(pane, clamped)
    }

    /// Applies zoom steps: positive zooms in (fewer columns), negative zooms
    /// out (more columns). Ignored while the compact layout is active.
    pub fn zoom(&mut self, pane: Pane, steps: i32) -> Option<ColumnsChanged> {
        if steps == 0 {
            return None;
        }
        if self.is_compact() {
            trace!(%pane, steps, "Zoom ignored in compact layout");
            return None;
        }
        let target = self.column_count(pane) as i64 - steps as i64;
        self.set_column_count(pane, target)
    }

    /// Switches between split and single-pane bounds, re-clamping both
    /// stored counts.
    pub fn set_split(&mut self, split: bool) -> Vec<ColumnsChanged> {
        if self.split == split {
            return Vec::new();
        }
        self.split = split;
        debug!(split, "Re-evaluating column bounds");

        Pane::ALL
            .into_iter()
            .filter_map(|pane| {
                let current = self.column_count(pane) as i64;
                let clamped = self.bounds().clamp(current);
                self.store(pane, clamped)
            })
            .collect()
    }

    /// Updates the device class from a viewport width. Returns true when
    /// the class changed.
    pub fn set_viewport_width(&mut self, viewport_width: f32, breakpoint_px: f32) -> bool {
        let device = DeviceClass::from_width(viewport_width, breakpoint_px);
        if device == self.device {
            return false;
        }
        debug!(?device, viewport_width, "Device class changed");
        self.device = device;
        true
    }

    fn store(&mut self, pane: Pane, columns: u32) -> Option<ColumnsChanged> {
        let slot = self.counts.get_mut(pane);
        if *slot == columns {
            return None;
        }
        debug!(%pane, from = *slot, to = columns, "Column count changed");
        *slot = columns;
        Some(ColumnsChanged { pane, columns })
    }
}
