//! Browser-wide tuning knobs.
//!
//! Defaults mirror the desktop/mobile breakpoints of the gallery layout.
//! Every field can be overridden through a `DUOPANE_*` environment variable;
//! unparsable or out-of-range values are ignored and the default is kept.

use once_cell::sync::OnceCell;
use tracing::warn;

/// Viewport width (px) under which the compact mobile layout applies.
const DEFAULT_BREAKPOINT_PX: f32 = 768.0;
/// Column count a pane starts with.
const DEFAULT_COLUMNS: u32 = 5;
const DEFAULT_GAP_PX: f32 = 16.0;
const DEFAULT_COMPACT_COLUMNS: u32 = 2;
const DEFAULT_COMPACT_GAP_PX: f32 = 4.0;
/// Column bounds while both panes share the content area.
const DEFAULT_SPLIT_MIN_COLUMNS: u32 = 2;
const DEFAULT_SPLIT_MAX_COLUMNS: u32 = 10;
/// Column bounds while one pane fills the content area.
const DEFAULT_SINGLE_MIN_COLUMNS: u32 = 2;
const DEFAULT_SINGLE_MAX_COLUMNS: u32 = 10;
/// Rows mounted above and below the viewport.
const DEFAULT_OVERSCAN_ROWS: u32 = 3;
/// Lists at or below this size are rendered without windowing.
const DEFAULT_FULL_RENDER_MAX: usize = 100;
/// Wheel/pinch units that make up one zoom step.
const DEFAULT_ZOOM_STEP_UNITS: f32 = 100.0;

static GLOBAL: OnceCell<BrowserConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub breakpoint_px: f32,
    pub default_columns: u32,
    pub gap_px: f32,
    pub compact_columns: u32,
    pub compact_gap_px: f32,
    pub split_min_columns: u32,
    pub split_max_columns: u32,
    pub single_min_columns: u32,
    pub single_max_columns: u32,
    pub overscan_rows: u32,
    pub full_render_max: usize,
    pub zoom_step_units: f32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            default_columns: DEFAULT_COLUMNS,
            gap_px: DEFAULT_GAP_PX,
            compact_columns: DEFAULT_COMPACT_COLUMNS,
            compact_gap_px: DEFAULT_COMPACT_GAP_PX,
            split_min_columns: DEFAULT_SPLIT_MIN_COLUMNS,
            split_max_columns: DEFAULT_SPLIT_MAX_COLUMNS,
            single_min_columns: DEFAULT_SINGLE_MIN_COLUMNS,
            single_max_columns: DEFAULT_SINGLE_MAX_COLUMNS,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            full_render_max: DEFAULT_FULL_RENDER_MAX,
            zoom_step_units: DEFAULT_ZOOM_STEP_UNITS,
        }
    }
}

impl BrowserConfig {
    /// Defaults with `DUOPANE_*` overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Process-wide configuration, read from the environment once.
    pub fn global() -> &'static BrowserConfig {
        GLOBAL.get_or_init(Self::from_env)
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var::<f32, _>(&lookup, "DUOPANE_BREAKPOINT_PX", |v| *v > 0.0) {
            config.breakpoint_px = v;
        }
        if let Some(v) = parse_var::<u32, _>(&lookup, "DUOPANE_DEFAULT_COLUMNS", |v| *v > 0) {
            config.default_columns = v;
        }
        if let Some(v) = parse_var::<f32, _>(&lookup, "DUOPANE_GAP_PX", |v| *v >= 0.0) {
            config.gap_px = v;
        }
        if let Some(v) = parse_var::<u32, _>(&lookup, "DUOPANE_COMPACT_COLUMNS", |v| *v > 0) {
            config.compact_columns = v;
        }
        if let Some(v) = parse_var::<f32, _>(&lookup, "DUOPANE_COMPACT_GAP_PX", |v| *v >= 0.0) {
            config.compact_gap_px = v;
        }
        for (key, slot) in [
            ("DUOPANE_SPLIT_MIN_COLUMNS", &mut config.split_min_columns),
            ("DUOPANE_SPLIT_MAX_COLUMNS", &mut config.split_max_columns),
            ("DUOPANE_SINGLE_MIN_COLUMNS", &mut config.single_min_columns),
            ("DUOPANE_SINGLE_MAX_COLUMNS", &mut config.single_max_columns),
        ] {
            if let Some(v) = parse_var::<u32, _>(&lookup, key, |v| *v > 0) {
                *slot = v;
            }
        }
        if let Some(v) = parse_var::<u32, _>(&lookup, "DUOPANE_OVERSCAN_ROWS", |_| true) {
            config.overscan_rows = v;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "DUOPANE_FULL_RENDER_MAX", |_| true) {
            config.full_render_max = v;
        }
        if let Some(v) = parse_var::<f32, _>(&lookup, "DUOPANE_ZOOM_STEP_UNITS", |v| *v > 0.0) {
            config.zoom_step_units = v;
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, valid: impl Fn(&T) -> bool) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid configuration override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = BrowserConfig::from_lookup(|_| None);
        assert_eq!(config, BrowserConfig::default());
        assert_eq!(config.breakpoint_px, 768.0);
        assert_eq!(config.compact_columns, 2);
    }

    #[test]
    fn test_overrides_applied() {
        let config = BrowserConfig::from_lookup(lookup_from(&[
            ("DUOPANE_BREAKPOINT_PX", "1024"),
            ("DUOPANE_DEFAULT_COLUMNS", "7"),
            ("DUOPANE_FULL_RENDER_MAX", "0"),
            ("DUOPANE_SINGLE_MAX_COLUMNS", "14"),
        ]));
        assert_eq!(config.single_max_columns, 14);
        assert_eq!(config.split_max_columns, 10);
        assert_eq!(config.breakpoint_px, 1024.0);
        assert_eq!(config.default_columns, 7);
        assert_eq!(config.full_render_max, 0);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let config = BrowserConfig::from_lookup(lookup_from(&[
            ("DUOPANE_DEFAULT_COLUMNS", "0"),
            ("DUOPANE_GAP_PX", "wide"),
            ("DUOPANE_BREAKPOINT_PX", "-5"),
        ]));
        assert_eq!(config.default_columns, DEFAULT_COLUMNS);
        assert_eq!(config.gap_px, DEFAULT_GAP_PX);
        assert_eq!(config.breakpoint_px, DEFAULT_BREAKPOINT_PX);
    }
}
