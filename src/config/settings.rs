//! App-level preferences stored in `settings.json`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info};

use crate::constants::settings::*;
use crate::persistence::{self, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(format!("unknown theme '{s}' (expected light, dark or system)")),
        }
    }
}

/// Process-wide preferences; every key falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: Theme,
    #[serde(rename = "refresh_interval")]
    pub refresh_interval_secs: u32,
    pub auto_save_logs: bool,
    pub enable_notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            auto_save_logs: DEFAULT_AUTO_SAVE_LOGS,
            enable_notifications: DEFAULT_ENABLE_NOTIFICATIONS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields defaults and is not created
    pub fn load(&self) -> Result<AppSettings, StoreError> {
        match persistence::read_json(&self.path) {
            Ok(settings) => Ok(settings),
            Err(e) if e.is_not_found() => {
                info!(path = %self.path.display(), "Settings file not found, using defaults");
                Ok(AppSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn load_or_default(&self) -> AppSettings {
        self.load().unwrap_or_else(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to load settings, using defaults");
            AppSettings::default()
        })
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), StoreError> {
        persistence::write_json(&self.path, settings, "app settings")?;
        info!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}
