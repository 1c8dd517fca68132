//! Month/week display mode selection.

use serde::{Deserialize, Serialize};

/// Viewports wider than this many CSS pixels get the month grid
pub const DEFAULT_BREAKPOINT_PX: u32 = 800;

/// Which calendar region is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Month,
    Week,
}

impl DisplayMode {
    /// Mode chosen automatically for a viewport width
    pub fn for_viewport(width: u32, breakpoint_px: u32) -> Self {
        if width > breakpoint_px {
            DisplayMode::Month
        } else {
            DisplayMode::Week
        }
    }

    pub fn other(&self) -> Self {
        match self {
            DisplayMode::Month => DisplayMode::Week,
            DisplayMode::Week => DisplayMode::Month,
        }
    }
}

/// Visibility of the two regions and their toggle controls.
///
/// The toggle offered is always the one for the inactive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub month_region: bool,
    pub week_region: bool,
    pub month_toggle: bool,
    pub week_toggle: bool,
}

impl Visibility {
    pub fn for_mode(mode: DisplayMode) -> Self {
        let month = mode == DisplayMode::Month;
        Self {
            month_region: month,
            week_region: !month,
            month_toggle: !month,
            week_toggle: month,
        }
    }
}

/// Owns the active display mode.
///
/// Viewport changes always override a manual toggle; there is no pinned
/// preference.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModeController {
    mode: DisplayMode,
    breakpoint_px: u32,
}

impl ViewModeController {
    /// Create a controller whose initial mode follows `viewport_width`
    pub fn new(breakpoint_px: u32, viewport_width: u32) -> Self {
        Self {
            mode: DisplayMode::for_viewport(viewport_width, breakpoint_px),
            breakpoint_px,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn breakpoint_px(&self) -> u32 {
        self.breakpoint_px
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::for_mode(self.mode)
    }

    pub fn activate_week_mode(&mut self) -> Visibility {
        self.set_mode(DisplayMode::Week)
    }

    pub fn activate_month_mode(&mut self) -> Visibility {
        self.set_mode(DisplayMode::Month)
    }

    pub fn viewport_changed(&mut self, width: u32) -> Visibility {
        self.set_mode(DisplayMode::for_viewport(width, self.breakpoint_px))
    }

    fn set_mode(&mut self, mode: DisplayMode) -> Visibility {
        if self.mode != mode {
            log::debug!("📅 Display mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.visibility()
    }
}
