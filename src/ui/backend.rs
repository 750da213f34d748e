use gtk4::gdk::{Display, Monitor};
use gtk4::prelude::*;
use gtk4::{Orientation, ToggleButton, Window};
use gtk4_layer_shell::{Edge, LayerShell};
use std::cell::{Cell, RefCell};
use tracing::warn;

use crate::placement::{DockWindow, Point, ScreenGeometry, ScreenSize, StrutHints, WindowOps};
use crate::ui::layer::{edge_margins, Gravity};

/// Used until a monitor reports its geometry
const FALLBACK_SCREEN: ScreenSize = ScreenSize::new(1920, 1080);

/// Placement backend over real GTK windows and layer-shell surfaces
pub struct GtkBackend {
    panel: Window,
    shadow: Window,
    menu: Window,
    toggle: ToggleButton,
    panel_height: Cell<i32>,
    last_screen: Cell<ScreenSize>,
    monitor: RefCell<Option<Monitor>>,
}

impl GtkBackend {
    pub fn new(
        panel: Window,
        shadow: Window,
        menu: Window,
        toggle: ToggleButton,
        panel_height: i32,
    ) -> Self {
        Self {
            panel,
            shadow,
            menu,
            toggle,
            panel_height: Cell::new(panel_height),
            last_screen: Cell::new(FALLBACK_SCREEN),
            monitor: RefCell::new(None),
        }
    }

    fn window(&self, window: DockWindow) -> &Window {
        match window {
            DockWindow::Panel => &self.panel,
            DockWindow::Shadow => &self.shadow,
            DockWindow::Menu => &self.menu,
        }
    }

    fn gravity(window: DockWindow) -> Gravity {
        match window {
            DockWindow::Panel | DockWindow::Shadow => Gravity::TopLeft,
            DockWindow::Menu => Gravity::BottomLeft,
        }
    }

    fn window_height(&self, window: DockWindow) -> i32 {
        match window {
            DockWindow::Panel => self.panel_height(),
            _ => {
                let window = self.window(window);
                window.height().max(window.size_request().1)
            }
        }
    }

    /// Change the bar height; takes effect on the next placement
    pub fn set_panel_height(&self, height: i32) {
        self.panel_height.set(height);

        // The old request would otherwise pin the measured minimum
        let (width, _) = self.panel.size_request();
        self.panel.set_size_request(width, height);
    }

    /// Output every surface is pinned to
    pub fn monitor(&self) -> Option<Monitor> {
        self.monitor.borrow().clone()
    }

    /// Pin panel, shadow and menu to one output. The current output is kept
    /// while it stays connected; otherwise the first connected one is used.
    pub fn bind_monitor(&self) -> Option<Monitor> {
        let monitors = Display::default()?.monitors();
        let connected = (0..monitors.n_items())
            .filter_map(|position| monitors.item(position).and_downcast::<Monitor>());

        let current = self.monitor();
        let chosen = choose_output(current.clone(), Monitor::is_valid, connected);

        if chosen != current {
            for window in [&self.panel, &self.shadow, &self.menu] {
                window.set_monitor(chosen.as_ref());
            }
            *self.monitor.borrow_mut() = chosen.clone();
        }

        chosen
    }
}

/// Keep `current` while `is_connected` holds for it, else take the first connected output
fn choose_output<M>(
    current: Option<M>,
    is_connected: impl Fn(&M) -> bool,
    connected: impl IntoIterator<Item = M>,
) -> Option<M> {
    match current {
        Some(output) if is_connected(&output) => Some(output),
        _ => connected.into_iter().next(),
    }
}

impl ScreenGeometry for GtkBackend {
    fn screen_size(&self) -> ScreenSize {
        match self.monitor().filter(Monitor::is_valid) {
            Some(monitor) => {
                let geometry = monitor.geometry();
                let size = ScreenSize::new(geometry.width(), geometry.height());
                self.last_screen.set(size);
                size
            }
            None => {
                let size = self.last_screen.get();
                warn!("No monitor available, assuming {}x{}", size.width, size.height);
                size
            }
        }
    }
}

impl WindowOps for GtkBackend {
    /// Laid-out height: the requested bar height unless the content needs more
    fn panel_height(&self) -> i32 {
        let (minimum, _, _, _) = self.panel.measure(Orientation::Vertical, -1);
        self.panel_height.get().max(minimum)
    }

    fn move_window(&self, window: DockWindow, origin: Point) {
        let screen = self.last_screen.get();
        let height = self.window_height(window);
        let (left, bottom) = edge_margins(screen, origin, height, Self::gravity(window));

        let surface = self.window(window);
        surface.set_margin(Edge::Left, left);
        surface.set_margin(Edge::Bottom, bottom);
    }

    fn resize_window(&self, window: DockWindow, width: i32, height: i32) {
        if window == DockWindow::Panel {
            self.panel_height.set(height);
        }
        self.window(window).set_size_request(width, height);
    }

    fn set_visible(&self, window: DockWindow, visible: bool) {
        self.window(window).set_visible(visible);
    }

    fn present(&self, window: DockWindow) {
        self.window(window).present();
    }

    fn set_toggle_active(&self, active: bool) {
        self.toggle.set_active(active);
    }
}

impl StrutHints for GtkBackend {
    fn reserve_bottom_strut(&self, window: DockWindow, pixels: i32) {
        self.window(window).set_exclusive_zone(pixels);
    }
}
