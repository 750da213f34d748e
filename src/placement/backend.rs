use super::geometry::{Point, ScreenSize};

/// Windows managed by the placement controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockWindow {
    Panel,
    Shadow,
    Menu,
}

/// Source of the current screen geometry
pub trait ScreenGeometry {
    fn screen_size(&self) -> ScreenSize;
}

/// Window movement and visibility primitives of the UI toolkit
pub trait WindowOps {
    /// Height currently allocated to the panel window
    fn panel_height(&self) -> i32;

    fn move_window(&self, window: DockWindow, origin: Point);

    fn resize_window(&self, window: DockWindow, width: i32, height: i32);

    fn set_visible(&self, window: DockWindow, visible: bool);

    /// Raise the window above others and give it focus
    fn present(&self, window: DockWindow);

    /// Set the menu toggle state. Emits the toggle's change notification.
    fn set_toggle_active(&self, active: bool);
}

/// Window-manager hints, fire and forget
pub trait StrutHints {
    fn reserve_bottom_strut(&self, window: DockWindow, pixels: i32);
}

/// Everything the controller needs from its environment
pub trait DockBackend: ScreenGeometry + WindowOps + StrutHints {}

impl<T: ScreenGeometry + WindowOps + StrutHints> DockBackend for T {}
