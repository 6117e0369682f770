//! Configuration management for the PLC dashboard
//!
//! - **project**: project collection with per-project connection settings (`project.json`)
//! - **settings**: app-level preferences (`settings.json`)
//! - **interval**: refresh interval and its pluggable backing
//! - **field_map**: display ⇄ storage key table used at the project store boundary
//! - **paths**: file locations

pub mod field_map;
pub mod interval;
pub mod paths;
pub mod project;
pub mod settings;

pub use interval::{
    ActiveProjectBacking, IntervalBacking, IntervalBackingKind, PreferenceStore, RefreshInterval,
};
pub use paths::DataPaths;
pub use project::{ByteOrder, ConnectionSettings, DeviceKind, Project, ProjectStore};
pub use settings::{AppSettings, SettingsStore, Theme};
