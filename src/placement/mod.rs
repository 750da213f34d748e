//! Dock placement and menu visibility, independent of the UI toolkit.

mod backend;
mod controller;
mod geometry;

pub use backend::{DockWindow, ScreenGeometry, StrutHints, WindowOps};
pub use controller::{MenuKey, PlacementController};
pub use geometry::{Point, ScreenSize};
