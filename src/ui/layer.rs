use gtk4::prelude::*;
use gtk4::Window;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use tracing::debug;

use crate::placement::{Point, ScreenSize};

/// Which corner of a window a move request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    TopLeft,
    BottomLeft,
}

/// Exclusive zone configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusiveZone {
    /// Set later through a strut request
    Strut,
    /// Ignore other surfaces' zones and keep the requested position
    Ignore,
}

/// Layer shell surface configuration
#[derive(Debug, Clone)]
pub struct LayerConfig {
    pub layer: Layer,
    pub anchors: Vec<Edge>,
    pub exclusive_zone: ExclusiveZone,
    pub keyboard_mode: KeyboardMode,
    pub namespace: &'static str,
}

impl LayerConfig {
    /// Bottom bar: the Top layer is shown on every workspace and acts as a dock
    pub fn panel() -> Self {
        Self {
            layer: Layer::Top,
            anchors: vec![Edge::Bottom, Edge::Left, Edge::Right],
            exclusive_zone: ExclusiveZone::Strut,
            keyboard_mode: KeyboardMode::None,
            namespace: "raven-panel",
        }
    }

    pub fn shadow() -> Self {
        Self {
            layer: Layer::Top,
            anchors: vec![Edge::Bottom, Edge::Left, Edge::Right],
            exclusive_zone: ExclusiveZone::Ignore,
            keyboard_mode: KeyboardMode::None,
            namespace: "raven-panel-shadow",
        }
    }

    /// Start menu popup, positioned by its bottom-left corner
    pub fn menu() -> Self {
        Self {
            layer: Layer::Overlay,
            anchors: vec![Edge::Bottom, Edge::Left],
            exclusive_zone: ExclusiveZone::Ignore,
            keyboard_mode: KeyboardMode::OnDemand,
            namespace: "raven-menu",
        }
    }

    pub fn apply(&self, window: &Window) {
        window.init_layer_shell();
        window.set_layer(self.layer);

        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            window.set_anchor(edge, self.anchors.contains(&edge));
        }

        match self.exclusive_zone {
            ExclusiveZone::Strut => window.set_exclusive_zone(0),
            ExclusiveZone::Ignore => window.set_exclusive_zone(-1),
        }

        window.set_keyboard_mode(self.keyboard_mode);
        window.set_namespace(self.namespace);

        debug!(
            "Configured layer surface: layer={:?}, anchors={:?}, namespace={}",
            self.layer, self.anchors, self.namespace
        );
    }
}

/// Margins from the left and bottom edges that put a window's `gravity`
/// corner at `origin`. Layer surfaces cannot be placed absolutely.
pub fn edge_margins(screen: ScreenSize, origin: Point, height: i32, gravity: Gravity) -> (i32, i32) {
    let bottom = match gravity {
        Gravity::TopLeft => screen.height.saturating_sub(origin.y).saturating_sub(height),
        Gravity::BottomLeft => screen.height.saturating_sub(origin.y),
    };
    (origin.x.max(0), bottom.max(0))
}
