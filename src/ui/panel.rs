use async_channel::Receiver;
use gtk4::gdk::{Display, Monitor};
use gtk4::prelude::*;
use gtk4::{
    Application, Box as GtkBox, EventControllerFocus, EventControllerKey, Image, Label,
    Orientation, ToggleButton, Window,
};
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

use crate::config::PanelSettings;
use crate::css;
use crate::messages::PanelEvent;
use crate::placement::PlacementController;
use crate::ui::backend::GtkBackend;
use crate::ui::layer::LayerConfig;
use crate::ui::menu::{menu_key, MenuWindow};
use crate::ui::shadow::ShadowWindow;
use crate::ui::Clock;

type Controller = PlacementController<GtkBackend>;

/// Bottom panel with start menu toggle, window list slot and clock
pub struct Panel {
    window: Window,
    shadow: ShadowWindow,
    menu: MenuWindow,
    toggle: ToggleButton,
    toggle_label: Label,
    toggle_icon: Image,
    clock: Clock,
    controller: Rc<Controller>,
}

impl Panel {
    pub fn new(app: &Application, settings: &PanelSettings, event_rx: Receiver<PanelEvent>) -> Rc<Self> {
        let window = Window::builder()
            .application(app)
            .title("Raven Panel")
            .decorated(false)
            .resizable(false)
            .build();
        window.add_css_class("panel");
        LayerConfig::panel().apply(&window);

        // Layer shell stretches the bar across the output; the request covers
        // the height and the initial width until the monitor is known
        window.set_size_request(-1, settings.height);

        let (toggle, toggle_icon, toggle_label) = Self::create_menu_toggle(settings);
        let clock = Clock::new(&settings.clock_format);
        window.set_child(Some(&Self::build_content(&toggle, &clock)));

        let shadow = ShadowWindow::new(app, -1, settings.shadow_offset);
        let menu = MenuWindow::new(app, &window);

        let backend = GtkBackend::new(
            window.clone(),
            shadow.window().clone(),
            menu.window().clone(),
            toggle.clone(),
            settings.height,
        );
        let controller = Rc::new(PlacementController::new(backend, settings.shadow_offset));

        let panel = Rc::new(Self {
            window,
            shadow,
            menu,
            toggle,
            toggle_label,
            toggle_icon,
            clock,
            controller,
        });

        panel.connect_signals(app);
        panel.clone().start_event_handler(event_rx);

        panel
    }

    fn create_menu_toggle(settings: &PanelSettings) -> (ToggleButton, Image, Label) {
        let toggle = ToggleButton::new();
        toggle.add_css_class("menu-button");
        toggle.set_can_focus(false);
        toggle.set_margin_start(3);
        toggle.set_margin_end(15);

        let icon = Image::from_icon_name(&settings.menu_icon);
        icon.set_margin_end(8);
        let label = Label::new(Some(&settings.menu_label));

        let content = GtkBox::new(Orientation::Horizontal, 0);
        content.append(&icon);
        content.append(&label);
        toggle.set_child(Some(&content));

        (toggle, icon, label)
    }

    fn build_content(toggle: &ToggleButton, clock: &Clock) -> GtkBox {
        let layout = GtkBox::new(Orientation::Horizontal, 0);
        layout.add_css_class("panel-container");
        layout.set_margin_top(2);
        layout.set_margin_bottom(2);
        layout.set_margin_start(2);
        layout.set_margin_end(2);

        layout.append(toggle);

        // Window list and power applets are packed into these slots
        let window_list = GtkBox::new(Orientation::Horizontal, 4);
        window_list.add_css_class("window-list");
        window_list.set_hexpand(true);
        layout.append(&window_list);

        let power = GtkBox::new(Orientation::Horizontal, 0);
        power.add_css_class("power-applet");
        layout.append(&power);

        let clock_widget = clock.widget();
        clock_widget.set_margin_start(3);
        clock_widget.set_margin_end(1);
        layout.append(clock_widget);

        layout
    }

    fn connect_signals(&self, app: &Application) {
        let controller = Rc::downgrade(&self.controller);

        let weak = controller.clone();
        self.window.connect_realize(move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.on_realize();
            }
        });

        let weak = controller.clone();
        self.toggle.connect_toggled(move |button| {
            if let Some(controller) = weak.upgrade() {
                controller.on_toggle_changed(button.is_active());
            }
        });

        let focus = EventControllerFocus::new();
        let weak = controller.clone();
        focus.connect_leave(move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.on_menu_focus_lost();
            }
        });
        self.menu.window().add_controller(focus);

        let keys = EventControllerKey::new();
        let weak = controller.clone();
        keys.connect_key_released(move |_, key, _, _| {
            if let Some(controller) = weak.upgrade() {
                controller.on_menu_key_released(menu_key(key));
            }
        });
        self.menu.window().add_controller(keys);

        self.connect_monitor(controller);

        // The panel is the application; closing it ends the process
        let app = app.clone();
        self.window.connect_destroy(move |_| {
            info!("Panel destroyed, quitting");
            app.quit();
        });
    }

    /// Pin the surfaces to one output and re-dock when it is resized or unplugged
    fn connect_monitor(&self, controller: Weak<Controller>) {
        if let Some(monitor) = self.controller.backend().bind_monitor() {
            watch_geometry(&monitor, controller.clone());
        }

        let Some(display) = Display::default() else {
            return;
        };

        display.monitors().connect_items_changed(move |_, _, _, _| {
            let Some(controller) = controller.upgrade() else {
                return;
            };

            let previous = controller.backend().monitor();
            let current = controller.backend().bind_monitor();
            if current == previous {
                return;
            }

            match &current {
                Some(monitor) => {
                    info!("Panel moved to monitor {:?}", monitor.connector());
                    watch_geometry(monitor, Rc::downgrade(&controller));
                }
                None => warn!("All monitors disconnected"),
            }
            controller.on_screen_changed();
        });
    }

    fn start_event_handler(self: Rc<Self>, event_rx: Receiver<PanelEvent>) {
        glib::spawn_future_local(async move {
            while let Ok(event) = event_rx.recv().await {
                self.handle_event(event);
            }
        });
    }

    fn handle_event(&self, event: PanelEvent) {
        match event {
            PanelEvent::SettingsReloaded(settings) => self.apply_settings(&settings),
        }
    }

    fn apply_settings(&self, settings: &PanelSettings) {
        css::apply_theme_preferences(settings.prefer_dark_theme);

        self.toggle_label.set_text(&settings.menu_label);
        self.toggle_icon.set_icon_name(Some(&settings.menu_icon));
        self.clock.set_format(&settings.clock_format);

        self.controller.backend().set_panel_height(settings.height);
        self.controller.set_shadow_offset(settings.shadow_offset);
        let placement = self.controller.on_screen_changed();

        info!(
            "Applied panel settings: height {}px, strut {}px",
            settings.height, placement.strut
        );
    }

    pub fn present(&self) {
        self.controller.on_screen_changed();
        self.shadow.window().present();
        self.window.present();
    }
}

fn watch_geometry(monitor: &Monitor, controller: Weak<Controller>) {
    monitor.connect_geometry_notify(move |_| {
        if let Some(controller) = controller.upgrade() {
            debug!("Monitor geometry changed");
            controller.on_screen_changed();
        }
    });
}
