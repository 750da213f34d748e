mod config;
mod css;
mod messages;
mod placement;
mod services;
mod ui;

use gtk4::prelude::*;
use gtk4::Application;
use tokio::runtime::Runtime;
use tracing::{error, info};

use crate::config::{ConfigPaths, PanelSettings};
use crate::messages::PanelEvent;
use crate::services::ConfigWatcher;
use crate::ui::Panel;

const APP_ID: &str = "org.ravenlinux.panel";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("raven_panel=info".parse()?),
        )
        .init();

    info!("Starting Raven Panel");

    // Runtime for the config watcher; GTK keeps the main thread
    let runtime = Runtime::new()?;

    // Events: services -> GTK (async-channel for glib compatibility)
    let (event_tx, event_rx) = async_channel::bounded::<PanelEvent>(16);

    runtime.spawn(async move {
        let watcher = ConfigWatcher::new(ConfigPaths::new(), event_tx);
        if let Err(e) = watcher.run().await {
            error!("Config watcher error: {}", e);
        }
    });

    let app = Application::builder()
        .application_id(APP_ID)
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| {
        let settings = PanelSettings::load_or_default(&ConfigPaths::new().panel_settings);

        css::load_css();
        css::apply_theme_preferences(settings.prefer_dark_theme);

        let panel = Panel::new(app, &settings, event_rx.clone());
        panel.present();

        info!("Panel window presented");
    });

    // Run GTK main loop (blocks)
    let exit_code = app.run();

    info!("Raven Panel exiting");

    drop(runtime);

    std::process::exit(exit_code.into());
}
