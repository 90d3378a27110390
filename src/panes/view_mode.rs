//! Which pane(s) are visible, and which one is maximized.
//!
//! Desktop and mobile each run their own three-state machine. Only the
//! machine matching the current device class is consulted, through
//! [`ActiveViewMode`], so a desktop state can never be combined with a
//! mobile one when answering visibility questions.

use std::str::FromStr;

use tracing::debug;

use crate::layout::DeviceClass;
use crate::models::Pane;

/// Desktop layout: split, or one pane filling the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesktopViewMode {
    Left,
    Right,
    #[default]
    Both,
}

impl DesktopViewMode {
    /// Two-way toggle: maximizing the already-maximized pane returns to
    /// split, anything else maximizes `pane` directly.
    pub fn toggled(self, pane: Pane) -> Self {
        let target = Self::exclusive(pane);
        if self == target {
            Self::Both
        } else {
            target
        }
    }

    fn exclusive(pane: Pane) -> Self {
        match pane {
            Pane::Source => Self::Left,
            Pane::Destination => Self::Right,
        }
    }
}

/// Mobile layout: stacked panes, or one pane shown full-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MobileViewMode {
    Left,
    Right,
    #[default]
    Both,
}

impl MobileViewMode {
    pub fn exclusive(pane: Pane) -> Self {
        match pane {
            Pane::Source => Self::Left,
            Pane::Destination => Self::Right,
        }
    }

    pub fn shows(self, pane: Pane) -> bool {
        matches!(
            (self, pane),
            (Self::Both, _) | (Self::Left, Pane::Source) | (Self::Right, Pane::Destination)
        )
    }

    pub fn maximizes(self, pane: Pane) -> bool {
        self == Self::exclusive(pane)
    }
}

impl FromStr for MobileViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "source" => Ok(Self::Left),
            "right" | "destination" => Ok(Self::Right),
            "both" | "split" => Ok(Self::Both),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// The view mode in effect for the current device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveViewMode {
    Desktop(DesktopViewMode),
    Mobile(MobileViewMode),
}

impl ActiveViewMode {
    pub fn is_visible(self, pane: Pane) -> bool {
        match self {
            Self::Desktop(DesktopViewMode::Both) => true,
            Self::Desktop(mode) => mode == DesktopViewMode::exclusive(pane),
            Self::Mobile(mode) => mode.shows(pane),
        }
    }

    pub fn is_maximized(self, pane: Pane) -> bool {
        match self {
            Self::Desktop(mode) => {
                mode != DesktopViewMode::Both && mode == DesktopViewMode::exclusive(pane)
            }
            Self::Mobile(mode) => mode.maximizes(pane),
        }
    }

    /// Both panes share the content area.
    pub fn is_split(self) -> bool {
        matches!(
            self,
            Self::Desktop(DesktopViewMode::Both) | Self::Mobile(MobileViewMode::Both)
        )
    }
}

/// Single source of truth for pane visibility, shared by both panes.
///
/// Session-lifetime: every state is reachable from every other and there
/// is no terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModeController {
    desktop: DesktopViewMode,
    mobile: MobileViewMode,
}

impl ViewModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desktop(&self) -> DesktopViewMode {
        self.desktop
    }

    pub fn mobile(&self) -> MobileViewMode {
        self.mobile
    }

    pub fn active(&self, device: DeviceClass) -> ActiveViewMode {
        match device {
            DeviceClass::Desktop => ActiveViewMode::Desktop(self.desktop),
            DeviceClass::Mobile => ActiveViewMode::Mobile(self.mobile),
        }
    }

    /// Desktop "full view" toggle for `pane`.
    pub fn toggle_full_view(&mut self, pane: Pane) -> DesktopViewMode {
        let next = self.desktop.toggled(pane);
        debug!(%pane, from = ?self.desktop, to = ?next, "Desktop view mode toggled");
        self.desktop = next;
        next
    }

    /// Mobile three-way selector.
    pub fn select_mobile(&mut self, mode: MobileViewMode) -> bool {
        if self.mobile == mode {
            return false;
        }
        debug!(from = ?self.mobile, to = ?mode, "Mobile view mode selected");
        self.mobile = mode;
        true
    }

    /// Mobile maximize toggle: show `pane` exclusively, or go back to both
    /// when it already is.
    pub fn toggle_mobile_maximize(&mut self, pane: Pane) -> MobileViewMode {
        let next = if self.mobile.maximizes(pane) {
            MobileViewMode::Both
        } else {
            MobileViewMode::exclusive(pane)
        };
        self.select_mobile(next);
        next
    }

    /// Routes a maximize request to the machine of the active device class.
    pub fn toggle_maximize(&mut self, pane: Pane, device: DeviceClass) -> ActiveViewMode {
        match device {
            DeviceClass::Desktop => ActiveViewMode::Desktop(self.toggle_full_view(pane)),
            DeviceClass::Mobile => ActiveViewMode::Mobile(self.toggle_mobile_maximize(pane)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_two_way_law() {
        let mut c = ViewModeController::new();
        assert_eq!(c.desktop(), DesktopViewMode::Both);
        assert_eq!(c.toggle_full_view(Pane::Source), DesktopViewMode::Left);
        assert_eq!(c.toggle_full_view(Pane::Source), DesktopViewMode::Both);

        c.toggle_full_view(Pane::Source);
        assert_eq!(c.toggle_full_view(Pane::Destination), DesktopViewMode::Right);
        assert_eq!(c.toggle_full_view(Pane::Destination), DesktopViewMode::Both);
    }

    #[test]
    fn test_mobile_visibility_matrix() {
        let left = ActiveViewMode::Mobile(MobileViewMode::Left);
        assert!(left.is_visible(Pane::Source));
        assert!(left.is_maximized(Pane::Source));
        assert!(!left.is_visible(Pane::Destination));
        assert!(!left.is_maximized(Pane::Destination));

        let both = ActiveViewMode::Mobile(MobileViewMode::Both);
        for pane in Pane::ALL {
            assert!(both.is_visible(pane));
            assert!(!both.is_maximized(pane));
        }

        let right = ActiveViewMode::Mobile(MobileViewMode::Right);
        assert!(!right.is_visible(Pane::Source));
        assert!(right.is_visible(Pane::Destination));
        assert!(right.is_maximized(Pane::Destination));
    }

    #[test]
    fn test_at_most_one_visible_unless_both() {
        for mode in [MobileViewMode::Left, MobileViewMode::Right] {
            let active = ActiveViewMode::Mobile(mode);
            let visible = Pane::ALL.iter().filter(|p| active.is_visible(**p)).count();
            assert_eq!(visible, 1);
        }
        for mode in [DesktopViewMode::Left, DesktopViewMode::Right] {
            let active = ActiveViewMode::Desktop(mode);
            let visible = Pane::ALL.iter().filter(|p| active.is_visible(**p)).count();
            assert_eq!(visible, 1);
        }
    }

    #[test]
    fn test_device_routes_to_own_machine() {
        let mut c = ViewModeController::new();
        c.toggle_maximize(Pane::Destination, DeviceClass::Mobile);
        assert_eq!(c.mobile(), MobileViewMode::Right);
        assert_eq!(c.desktop(), DesktopViewMode::Both);
        assert!(c.active(DeviceClass::Desktop).is_visible(Pane::Source));
        assert!(!c.active(DeviceClass::Mobile).is_visible(Pane::Source));

        c.toggle_maximize(Pane::Destination, DeviceClass::Mobile);
        assert_eq!(c.mobile(), MobileViewMode::Both);
    }

    #[test]
    fn test_mobile_selector_reaches_every_state() {
        let all = [MobileViewMode::Left, MobileViewMode::Right, MobileViewMode::Both];
        let mut c = ViewModeController::new();
        for from in all {
            for to in all {
                c.select_mobile(from);
                c.select_mobile(to);
                assert_eq!(c.mobile(), to);
            }
        }
        assert!(!c.select_mobile(c.mobile()));
    }

    #[test]
    fn test_split_flag() {
        assert!(ActiveViewMode::Desktop(DesktopViewMode::Both).is_split());
        assert!(!ActiveViewMode::Desktop(DesktopViewMode::Left).is_split());
        assert!(ActiveViewMode::Mobile(MobileViewMode::Both).is_split());
        assert!(!ActiveViewMode::Mobile(MobileViewMode::Right).is_split());
    }
}
