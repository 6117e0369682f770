//! Where the dashboard keeps its files
//!
//! `DataPaths` is built once in `main` and handed to whatever needs a file
//! location; nothing else looks up directories on its own.

use std::path::{Path, PathBuf};

use crate::constants::config::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    data_dir: PathBuf,
    preferences_dir: PathBuf,
}

impl DataPaths {
    /// CLI flag wins over the environment value, which wins over the platform
    /// config directory (or `.` when the platform has none)
    pub fn resolve(cli_dir: Option<PathBuf>, env_dir: Option<PathBuf>) -> Self {
        let config_root = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_dir = cli_dir
            .or(env_dir)
            .unwrap_or_else(|| config_root.join(APP_DIR));

        Self {
            data_dir,
            preferences_dir: config_root.join(PREFERENCES_ORG_DIR),
        }
    }

    /// Keep everything, preferences included, below `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let data_dir = dir.into();
        Self {
            preferences_dir: data_dir.join(PREFERENCES_ORG_DIR),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn project_file(&self) -> PathBuf {
        self.data_dir.join(PROJECT_FILENAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILENAME)
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.preferences_dir.join(PREFERENCES_FILENAME)
    }
}
