//! Admin Shell State
//!
//! Sidebar, overlay and header dropdown flags. Each flag maps to the
//! `active` class on its element.

/// Sidebar and overlay visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellState {
    pub sidebar_active: bool,
    pub overlay_active: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desktop sidebar toggle: flips the sidebar only
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_active = !self.sidebar_active;
    }

    /// Mobile menu toggle: flips sidebar and overlay independently
    pub fn toggle_mobile_menu(&mut self) {
        self.sidebar_active = !self.sidebar_active;
        self.overlay_active = !self.overlay_active;
    }

    /// Overlay click
    pub fn close_sidebar(&mut self) {
        self.sidebar_active = false;
        self.overlay_active = false;
    }

    /// Menu item click; closes the sidebar on narrow viewports only.
    /// Returns whether it closed.
    pub fn menu_item_clicked(&mut self, viewport_width: f64, breakpoint_px: u32) -> bool {
        if viewport_width <= f64::from(breakpoint_px) {
            self.close_sidebar();
            true
        } else {
            false
        }
    }
}

/// Header dropdown opened by hovering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    pub active: bool,
}

impl DropdownState {
    pub fn pointer_enter(&mut self) {
        self.active = true;
    }

    pub fn pointer_leave(&mut self) {
        self.active = false;
    }
}
