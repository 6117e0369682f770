//! Project collection stored in `project.json`
//!
//! Each project bundles a machine identifier with the connection settings of
//! its PLC. The file is a JSON array; keys are the storage names
//! (`name_cn`, `name_en`, `is_active`, `plc_settings`).
//!
//! Known keys are always written in the order above (and the fixed order of
//! the nine connection keys); unknown keys follow them in the order they were
//! read. A file already in that layout survives load and save byte for byte.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info, warn};

use super::field_map::{self, Direction};
use super::interval::clamp_refresh_interval;
use crate::constants::connection::*;
use crate::persistence::{self, StoreError};

/// Kind of device the station talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceKind {
    #[default]
    S7,
    /// Older project files spell this `sqllite`; both are accepted on read
    #[serde(rename = "sqlite", alias = "sqllite")]
    Sqlite,
    #[serde(rename = "MySQL")]
    MySql,
}

/// Word byte order used when decoding device registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ByteOrder {
    #[default]
    Abcd,
    Cdab,
    Badc,
    Dcba,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceKind::S7 => "S7",
            DeviceKind::Sqlite => "sqlite",
            DeviceKind::MySql => "MySQL",
        })
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s7" => Ok(DeviceKind::S7),
            "sqlite" | "sqllite" => Ok(DeviceKind::Sqlite),
            "mysql" => Ok(DeviceKind::MySql),
            _ => Err(format!("unknown device type '{s}' (expected S7, sqlite or MySQL)")),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ByteOrder::Abcd => "ABCD",
            ByteOrder::Cdab => "CDAB",
            ByteOrder::Badc => "BADC",
            ByteOrder::Dcba => "DCBA",
        })
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ABCD" => Ok(ByteOrder::Abcd),
            "CDAB" => Ok(ByteOrder::Cdab),
            "BADC" => Ok(ByteOrder::Badc),
            "DCBA" => Ok(ByteOrder::Dcba),
            _ => Err(format!("unknown byte order '{s}' (expected ABCD, CDAB, BADC or DCBA)")),
        }
    }
}

/// Connection settings of one project (`plc_settings` in the file)
///
/// Missing keys fall back to defaults on load. Keys we do not know about are
/// kept in `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(rename = "device_type", default)]
    pub device_kind: DeviceKind,
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(rename = "heartbeat", default = "default_heartbeat")]
    pub heartbeat_period: u32,
    #[serde(rename = "timeout", default = "default_timeout_ms")]
    pub io_timeout_ms: u32,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(rename = "address", default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    /// Stored in plaintext, as the station software always has
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_heartbeat() -> u32 {
    DEFAULT_HEARTBEAT
}

fn default_timeout_ms() -> u32 {
    DEFAULT_TIMEOUT_MS
}

fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL_MS
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            device_kind: DeviceKind::default(),
            byte_order: ByteOrder::default(),
            heartbeat_period: default_heartbeat(),
            io_timeout_ms: default_timeout_ms(),
            refresh_interval_ms: default_refresh_interval_ms(),
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            extra: Map::new(),
        }
    }
}

impl ConnectionSettings {
    /// Raise the refresh interval to the floor. Returns true if it changed.
    pub fn clamp_refresh_interval(&mut self) -> bool {
        let clamped = clamp_refresh_interval(self.refresh_interval_ms);
        if clamped != self.refresh_interval_ms {
            warn!(
                refresh_interval_ms = self.refresh_interval_ms,
                min = MIN_REFRESH_INTERVAL_MS,
                "refresh_interval_ms below minimum, clamping"
            );
            self.refresh_interval_ms = clamped;
            return true;
        }
        false
    }
}

/// A named configuration profile for one tunneling machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "name_cn")]
    pub display_name: String,
    #[serde(rename = "name_en")]
    pub machine_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "plc_settings", default)]
    pub connection: ConnectionSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Create an inactive project with default connection settings
    pub fn new(display_name: impl Into<String>, machine_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            machine_name: machine_name.into(),
            is_active: false,
            connection: ConnectionSettings::default(),
            extra: Map::new(),
        }
    }

    /// Machine names compare case-insensitively
    pub fn has_machine_name(&self, machine_name: &str) -> bool {
        self.machine_name.eq_ignore_ascii_case(machine_name)
    }

    /// Display name contains `term`, or machine name contains it ignoring case
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty()
            || self.display_name.contains(term)
            || self
                .machine_name
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

/// Make sure exactly one project is active when the collection is non-empty.
///
/// With none active the first project is promoted; with several, only the
/// first of them stays active. Returns true if anything changed.
pub fn normalize_active(projects: &mut [Project]) -> bool {
    let Some(first_active) = projects.iter().position(|p| p.is_active) else {
        if let Some(first) = projects.first_mut() {
            warn!(project = %first.machine_name, "No active project, activating the first one");
            first.is_active = true;
            return true;
        }
        return false;
    };

    let mut changed = false;
    for project in projects.iter_mut().skip(first_active + 1) {
        if project.is_active {
            warn!(project = %project.machine_name, "Multiple active projects, deactivating");
            project.is_active = false;
            changed = true;
        }
    }
    changed
}

/// Keep the first project for each machine name (compared ignoring case).
/// Returns true if anything was dropped.
pub fn drop_duplicate_machine_names(projects: &mut Vec<Project>) -> bool {
    let before = projects.len();
    let mut seen: Vec<String> = Vec::with_capacity(before);
    projects.retain(|project| {
        let key = project.machine_name.to_ascii_lowercase();
        if seen.contains(&key) {
            warn!(project = %project.machine_name, "Duplicate machine name in project file, dropping");
            return false;
        }
        seen.push(key);
        true
    });
    projects.len() != before
}

/// Reads and writes the project collection file
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection. A missing file is an empty collection.
    ///
    /// Refresh intervals below the floor are raised, later projects reusing a
    /// machine name are dropped and the active flag is normalized; the file
    /// itself is not touched until the next save.
    pub fn load(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = match persistence::read_json(&self.path) {
            Ok(projects) => projects,
            Err(e) if e.is_not_found() => {
                info!(path = %self.path.display(), "Project file not found, starting with no projects");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        for project in &mut projects {
            if project.connection.clamp_refresh_interval() {
                info!(project = %project.machine_name, "Corrected refresh interval for project");
            }
        }
        drop_duplicate_machine_names(&mut projects);
        normalize_active(&mut projects);

        info!(path = %self.path.display(), count = projects.len(), "Loaded projects");
        Ok(projects)
    }

    /// Load, logging and substituting an empty collection on failure
    pub fn load_or_default(&self) -> Vec<Project> {
        self.load().unwrap_or_else(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to load projects, using empty collection");
            Vec::new()
        })
    }

    /// Overwrite the file with `projects`
    pub fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        persistence::write_json(&self.path, projects, "project collection")?;
        info!(path = %self.path.display(), count = projects.len(), "Saved projects");
        Ok(())
    }

    /// Parse a display-named project array (or single project) coming from the UI
    pub fn from_display(document: Value) -> Result<Vec<Project>, StoreError> {
        let storage = match field_map::remap_collection(document, Direction::ToStorage) {
            Value::Array(items) => Value::Array(items),
            single => Value::Array(vec![single]),
        };
        serde_json::from_value(storage).map_err(|source| StoreError::Decode {
            what: "project collection",
            source,
        })
    }

    /// Render the collection with display names for the UI
    pub fn to_display(projects: &[Project]) -> Result<Value, StoreError> {
        let storage = serde_json::to_value(projects).map_err(|source| StoreError::Serialize {
            what: "project collection",
            source,
        })?;
        Ok(field_map::remap_collection(storage, Direction::ToDisplay))
    }
}
