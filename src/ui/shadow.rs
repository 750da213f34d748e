use gtk4::prelude::*;
use gtk4::{Application, Window};

use crate::ui::layer::LayerConfig;

/// Thin strip drawn directly above the panel; purely decorative
pub struct ShadowWindow {
    window: Window,
}

impl ShadowWindow {
    pub fn new(app: &Application, width: i32, height: i32) -> Self {
        let window = Window::builder()
            .application(app)
            .title("Raven Panel Shadow")
            .decorated(false)
            .resizable(false)
            .can_focus(false)
            .build();

        window.add_css_class("panel-shadow");
        window.set_size_request(width, height);
        LayerConfig::shadow().apply(&window);

        Self { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}
