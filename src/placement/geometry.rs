/// Size of the screen the panel is docked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of a window in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Result of docking the panel against the bottom screen edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub panel: Point,
    pub shadow: Point,
    /// Pixels reserved at the bottom edge
    pub strut: i32,
}

/// Dock the panel flush with the bottom edge, with the shadow directly above it.
///
/// Coordinates saturate instead of wrapping for sizes larger than the screen.
pub fn dock_placement(screen: ScreenSize, panel_height: i32, shadow_offset: i32) -> Placement {
    let panel = Point::new(0, screen.height.saturating_sub(panel_height));
    let shadow = Point::new(panel.x, panel.y.saturating_sub(shadow_offset));

    Placement {
        panel,
        shadow,
        strut: panel_height,
    }
}

/// Origin of the start menu for the panel's current height.
pub fn menu_origin(screen: ScreenSize, panel_height: i32) -> Point {
    Point::new(0, screen.height.saturating_sub(panel_height))
}
