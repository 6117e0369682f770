//! Dashboard refresh interval and where it is kept
//!
//! Two backings exist: the platform preference store (a key-value file in the
//! user's config directory) and the active project's connection settings in
//! `project.json`. A deployment picks one. When the chosen backing has no
//! value, `PLC_REFRESH_INTERVAL_MS` is consulted before the built-in default.

use clap::ValueEnum;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::project::ProjectStore;
use crate::constants::connection::{DEFAULT_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS};
use crate::constants::preferences;
use crate::persistence::{self, StoreError};

/// Raise `ms` to the floor. There is no upper bound.
pub fn clamp_refresh_interval(ms: u64) -> u64 {
    ms.max(MIN_REFRESH_INTERVAL_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IntervalBackingKind {
    /// Platform preference store
    #[default]
    Preferences,
    /// Connection settings of the active project
    Project,
}

impl IntervalBackingKind {
    /// CLI choice wins, then the environment value, then the default
    pub fn resolve(cli: Option<Self>, env_value: Option<&str>) -> Self {
        if let Some(kind) = cli {
            return kind;
        }
        match env_value.map(|v| <Self as ValueEnum>::from_str(v.trim(), true)) {
            Some(Ok(kind)) => kind,
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring invalid interval backing from environment");
                Self::default()
            }
            None => Self::default(),
        }
    }
}

/// Somewhere the refresh interval can be read from and written to
pub trait IntervalBacking {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the backing is reachable but holds no value
    fn read_refresh_interval_ms(&self) -> Result<Option<u64>, StoreError>;

    fn write_refresh_interval_ms(&self, ms: u64) -> Result<(), StoreError>;
}

/// Flat key-value preference file, one per user
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_map(&self) -> Result<Map<String, Value>, StoreError> {
        match persistence::read_json(&self.path) {
            Ok(map) => Ok(map),
            Err(e) if e.is_not_found() => Ok(Map::new()),
            Err(e) => Err(e),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.load_map()?.remove(key))
    }

    pub fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value);
        persistence::write_json(&self.path, &map, "preferences")
    }
}

impl IntervalBacking for PreferenceStore {
    fn name(&self) -> &'static str {
        "preferences"
    }

    fn read_refresh_interval_ms(&self) -> Result<Option<u64>, StoreError> {
        let value = self.get(preferences::REFRESH_INTERVAL_MS)?;
        Ok(value.and_then(|v| {
            v.as_u64().or_else(|| {
                warn!(value = %v, "Preference refresh_interval_ms is not a positive integer");
                None
            })
        }))
    }

    fn write_refresh_interval_ms(&self, ms: u64) -> Result<(), StoreError> {
        self.set(preferences::REFRESH_INTERVAL_MS, Value::from(ms))
    }
}

/// Reads the interval from the active project (or the first, if none is active)
#[derive(Debug, Clone)]
pub struct ActiveProjectBacking {
    store: ProjectStore,
}

impl ActiveProjectBacking {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }
}

impl IntervalBacking for ActiveProjectBacking {
    fn name(&self) -> &'static str {
        "project"
    }

    fn read_refresh_interval_ms(&self) -> Result<Option<u64>, StoreError> {
        let projects = self.store.load()?;
        Ok(projects
            .iter()
            .find(|p| p.is_active)
            .or_else(|| projects.first())
            .map(|p| p.connection.refresh_interval_ms))
    }

    fn write_refresh_interval_ms(&self, ms: u64) -> Result<(), StoreError> {
        let mut projects = self.store.load()?;
        let target = match projects.iter().position(|p| p.is_active) {
            Some(idx) => idx,
            None if !projects.is_empty() => 0,
            None => return Err(StoreError::NoProject(self.store.path().to_path_buf())),
        };
        projects[target].connection.refresh_interval_ms = ms;
        self.store.save(&projects)
    }
}

/// The dashboard's view of the configured refresh interval
pub struct RefreshInterval {
    backing: Box<dyn IntervalBacking>,
    env_override: Option<String>,
}

impl RefreshInterval {
    pub fn new(backing: Box<dyn IntervalBacking>, env_override: Option<String>) -> Self {
        Self {
            backing,
            env_override,
        }
    }

    pub fn backing_name(&self) -> &'static str {
        self.backing.name()
    }

    fn env_override_ms(&self) -> Option<u64> {
        let raw = self.env_override.as_deref()?;
        raw.trim()
            .parse()
            .inspect_err(|e| warn!(value = %raw, error = %e, "Ignoring invalid refresh interval override"))
            .ok()
    }

    /// Current interval in milliseconds, never below the floor
    pub fn current_ms(&self) -> u64 {
        let primary = match self.backing.read_refresh_interval_ms() {
            Ok(value) => value,
            Err(e) => {
                warn!(backing = self.backing.name(), error = %e, "Refresh interval backing unavailable");
                None
            }
        };

        let ms = primary
            .or_else(|| {
                debug!(backing = self.backing.name(), "No refresh interval in backing");
                self.env_override_ms()
            })
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS);
        clamp_refresh_interval(ms)
    }

    /// Store a new interval; returns the value actually stored after clamping
    pub fn set_ms(&self, ms: u64) -> Result<u64, StoreError> {
        let ms = clamp_refresh_interval(ms);
        self.backing.write_refresh_interval_ms(ms)?;
        info!(backing = self.backing.name(), refresh_interval_ms = ms, "Refresh interval updated");
        Ok(ms)
    }
}
