use async_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ConfigPaths, PanelSettings};
use crate::messages::PanelEvent;

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Service that watches panel.json for changes using inotify
pub struct ConfigWatcher {
    paths: ConfigPaths,
    event_tx: Sender<PanelEvent>,
}

impl ConfigWatcher {
    pub fn new(paths: ConfigPaths, event_tx: Sender<PanelEvent>) -> Self {
        Self { paths, event_tx }
    }

    /// Run the config watcher (blocks forever)
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Starting config watcher");

        // Watch the parent dir since the file might not exist yet
        let settings_dir = self
            .paths
            .panel_settings
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("Invalid settings path"))?;
        tokio::fs::create_dir_all(&settings_dir).await?;

        let (notify_tx, mut notify_rx) = mpsc::channel::<PathBuf>(32);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        for path in event.paths {
                            let _ = notify_tx.blocking_send(path);
                        }
                    }
                }
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&settings_dir, RecursiveMode::NonRecursive)?;
        debug!("Watching directory: {:?}", settings_dir);

        // Editors write in bursts; wait for the file to settle
        let mut debounce_deadline: Option<tokio::time::Instant> = None;

        loop {
            tokio::select! {
                Some(path) = notify_rx.recv() => {
                    if path == self.paths.panel_settings {
                        debounce_deadline = Some(tokio::time::Instant::now() + DEBOUNCE);
                    }
                }

                _ = async {
                    match debounce_deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    debounce_deadline = None;
                    self.reload_settings().await;
                }
            }
        }
    }

    async fn reload_settings(&self) {
        debug!("Reloading panel settings: {:?}", self.paths.panel_settings);

        match read_settings(&self.paths.panel_settings).await {
            Ok(settings) => {
                info!("Panel settings reloaded, height {}px", settings.height);
                let _ = self.event_tx.send(PanelEvent::SettingsReloaded(settings)).await;
            }
            Err(e) => warn!("Ignoring settings change: {}", e),
        }
    }
}

/// Read and validate panel.json without blocking the runtime
pub async fn read_settings(path: &Path) -> Result<PanelSettings, ConfigError> {
    let data = tokio::fs::read(path).await.map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PanelSettings::from_slice(path, &data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_valid_settings() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("panel.json");
        tokio::fs::write(&path, r#"{ "height": 40, "shadow_offset": 2 }"#).await?;

        let settings = read_settings(&path).await?;
        assert_eq!(settings.height, 40);
        assert_eq!(settings.shadow_offset, 2);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_invalid_settings() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("panel.json");
        tokio::fs::write(&path, r#"{ "height": -5 }"#).await?;

        assert!(matches!(
            read_settings(&path).await,
            Err(ConfigError::Invalid(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn reload_forwards_event() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let paths = ConfigPaths {
            panel_settings: dir.path().join("panel.json"),
        };
        tokio::fs::write(&paths.panel_settings, r#"{ "menu_label": "Start" }"#).await?;

        let (tx, rx) = async_channel::bounded(4);
        let watcher = ConfigWatcher::new(paths, tx);
        watcher.reload_settings().await;

        let PanelEvent::SettingsReloaded(settings) = rx.recv().await?;
        assert_eq!(settings.menu_label, "Start");
        Ok(())
    }
}
