use crate::config::PanelSettings;

/// Events FROM async services TO GTK
#[derive(Debug, Clone)]
pub enum PanelEvent {
    /// panel.json changed on disk and parsed cleanly
    SettingsReloaded(PanelSettings),
}
