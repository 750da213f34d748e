use gtk4::gdk::Key;
use gtk4::prelude::*;
use gtk4::{Application, Box as GtkBox, Label, Orientation, Window};

use crate::placement::MenuKey;
use crate::ui::layer::LayerConfig;

/// Start menu popup; shown and hidden by the panel's menu toggle
pub struct MenuWindow {
    window: Window,
}

impl MenuWindow {
    pub fn new(app: &Application, panel: &Window) -> Self {
        let window = Window::builder()
            .application(app)
            .title("Raven Menu")
            .decorated(false)
            .resizable(false)
            .transient_for(panel)
            .build();

        LayerConfig::menu().apply(&window);

        let content = GtkBox::new(Orientation::Vertical, 4);
        content.add_css_class("menu-window");

        let header = Label::new(Some("Applications"));
        header.set_xalign(0.0);
        header.add_css_class("menu-section-label");
        content.append(&header);

        window.set_child(Some(&content));

        Self { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

pub fn menu_key(key: Key) -> MenuKey {
    if key == Key::Escape {
        MenuKey::Escape
    } else {
        MenuKey::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_escape_dismisses() {
        assert_eq!(menu_key(Key::Escape), MenuKey::Escape);
        assert_eq!(menu_key(Key::Return), MenuKey::Other);
        assert_eq!(menu_key(Key::q), MenuKey::Other);
    }
}
