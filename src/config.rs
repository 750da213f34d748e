use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Height of the bar in pixels
pub const DEFAULT_PANEL_HEIGHT: i32 = 25;

/// Height of the shadow strip drawn above the bar
pub const DEFAULT_SHADOW_OFFSET: i32 = 4;

/// Largest accepted bar height
pub const MAX_PANEL_HEIGHT: i32 = 256;

/// Largest accepted shadow strip
pub const MAX_SHADOW_OFFSET: i32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid panel settings: {0}")]
    Invalid(String),
}

impl ConfigError {
    fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Panel settings (panel.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_shadow_offset")]
    pub shadow_offset: i32,
    #[serde(default = "default_true")]
    pub prefer_dark_theme: bool,
    #[serde(default = "default_clock_format")]
    pub clock_format: String,
    #[serde(default = "default_menu_label")]
    pub menu_label: String,
    #[serde(default = "default_menu_icon")]
    pub menu_icon: String,
}

fn default_height() -> i32 {
    DEFAULT_PANEL_HEIGHT
}

fn default_shadow_offset() -> i32 {
    DEFAULT_SHADOW_OFFSET
}

fn default_true() -> bool {
    true
}

fn default_clock_format() -> String {
    // Mon Jan 2  3:04 PM
    "%a %b %-d  %-I:%M %p".to_string()
}

fn default_menu_label() -> String {
    "Menu".to_string()
}

fn default_menu_icon() -> String {
    "start-here".to_string()
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            height: default_height(),
            shadow_offset: default_shadow_offset(),
            prefer_dark_theme: true,
            clock_format: default_clock_format(),
            menu_label: default_menu_label(),
            menu_icon: default_menu_icon(),
        }
    }
}

impl PanelSettings {
    pub fn from_slice(path: &Path, data: &[u8]) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_slice(data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(path, &data)
    }

    /// Load settings, falling back to defaults when the file is missing or broken.
    /// A missing file is created with the defaults so it can be edited.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) if e.is_not_found() => {
                debug!("No panel settings at {:?}, writing defaults", path);
                let settings = Self::default();
                if let Err(e) = settings.save(path) {
                    warn!("Could not write default settings: {}", e);
                }
                settings
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, data).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PANEL_HEIGHT).contains(&self.height) {
            return Err(ConfigError::Invalid(format!(
                "height must be between 1 and {}, got {}",
                MAX_PANEL_HEIGHT, self.height
            )));
        }
        if !(0..=MAX_SHADOW_OFFSET).contains(&self.shadow_offset) {
            return Err(ConfigError::Invalid(format!(
                "shadow_offset must be between 0 and {}, got {}",
                MAX_SHADOW_OFFSET, self.shadow_offset
            )));
        }
        Ok(())
    }
}

/// Configuration paths
pub struct ConfigPaths {
    pub panel_settings: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));

        Self {
            panel_settings: config_dir.join("raven/panel.json"),
        }
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new()
    }
}
