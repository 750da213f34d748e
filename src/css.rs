use gtk4::gdk::Display;
use gtk4::CssProvider;
use tracing::{debug, warn};

/// Panel CSS theme
pub const PANEL_CSS: &str = r#"
.panel {
    background-color: rgba(30, 30, 30, 0.9);
    border-top: 1px solid rgba(255, 255, 255, 0.08);
}

.panel-container {
    padding: 0 2px;
}

.panel-shadow {
    background: linear-gradient(
        to bottom,
        rgba(0, 0, 0, 0.0) 0%,
        rgba(0, 0, 0, 0.35) 100%
    );
}

.menu-button {
    background: transparent;
    border: none;
    border-radius: 4px;
    padding: 0 8px;
    color: rgba(255, 255, 255, 0.9);
    min-height: 0;
}

.menu-button:hover {
    background: rgba(255, 255, 255, 0.12);
}

.menu-button:checked {
    background: rgba(0, 150, 136, 0.45);
}

.window-list {
    min-width: 50px;
}

.clock {
    font-weight: 600;
    padding: 0 8px;
    color: rgba(255, 255, 255, 0.95);
    font-size: 12px;
}

.menu-window {
    background: rgba(30, 30, 35, 0.97);
    border-radius: 8px 8px 0 0;
    border: 1px solid rgba(255, 255, 255, 0.1);
    padding: 8px;
    min-width: 280px;
    min-height: 360px;
}

.menu-window button {
    background: transparent;
    border: none;
    border-radius: 6px;
    padding: 8px 16px;
    color: rgba(255, 255, 255, 0.9);
}

.menu-window button:hover {
    background: rgba(255, 255, 255, 0.1);
}

.menu-section-label {
    color: rgba(150, 150, 150, 0.8);
    font-size: 11px;
    font-weight: 600;
    padding: 4px 16px;
}
"#;

/// Load and apply the panel CSS theme
pub fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_data(PANEL_CSS);

    match Display::default() {
        Some(display) => {
            gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
            debug!("CSS theme loaded");
        }
        None => warn!("No default display, panel theme not applied"),
    }
}

/// Apply toolkit-wide appearance preferences
pub fn apply_theme_preferences(prefer_dark: bool) {
    if let Some(settings) = gtk4::Settings::default() {
        settings.set_gtk_application_prefer_dark_theme(prefer_dark);
        debug!("Prefer dark theme: {}", prefer_dark);
    }
}
