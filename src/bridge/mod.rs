//! Sync layer between the presentation layer and the stores
//!
//! The bridge owns the in-memory project collection and app settings. Every
//! request is validated against a copy first; only a valid result replaces
//! the in-memory state and is written through to disk. If the write fails
//! the new state is kept for the rest of the session and the error is
//! returned so the caller can tell the user.

pub mod transfer;
pub mod validation;

use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::interval::clamp_refresh_interval;
use crate::config::project::normalize_active;
use crate::config::{
    ActiveProjectBacking, AppSettings, ConnectionSettings, DataPaths, IntervalBacking,
    IntervalBackingKind, PreferenceStore, Project, ProjectStore, RefreshInterval, SettingsStore,
};
use crate::persistence::{self, StoreError};

pub use validation::ValidationError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no project is selected or active")]
    NoProjectSelected,

    #[error("no project named '{0}'")]
    ProjectNotFound(String),
}

pub struct Bridge {
    project_store: ProjectStore,
    settings_store: SettingsStore,
    interval: RefreshInterval,
    interval_kind: IntervalBackingKind,
    projects: Vec<Project>,
    settings: AppSettings,
}

impl Bridge {
    /// Open the stores below `paths`, falling back to empty/default state on
    /// unreadable files
    pub fn open(
        paths: &DataPaths,
        interval_kind: IntervalBackingKind,
        env_interval_override: Option<String>,
    ) -> Self {
        let project_store = ProjectStore::new(paths.project_file());
        let settings_store = SettingsStore::new(paths.settings_file());

        let backing: Box<dyn IntervalBacking> = match interval_kind {
            IntervalBackingKind::Preferences => Box::new(PreferenceStore::new(paths.preferences_file())),
            IntervalBackingKind::Project => Box::new(ActiveProjectBacking::new(project_store.clone())),
        };
        let interval = RefreshInterval::new(backing, env_interval_override);

        let projects = project_store.load_or_default();
        let settings = settings_store.load_or_default();

        Self {
            project_store,
            settings_store,
            interval,
            interval_kind,
            projects,
            settings,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.is_active)
    }

    pub fn search(&self, term: &str) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.matches_search(term)).collect()
    }

    pub fn app_settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn refresh_interval(&self) -> &RefreshInterval {
        &self.interval
    }

    /// The collection with display-facing key names
    pub fn projects_display(&self) -> Result<Value, BridgeError> {
        Ok(ProjectStore::to_display(&self.projects)?)
    }

    fn position(&self, machine_name: &str) -> Result<usize, BridgeError> {
        self.projects
            .iter()
            .position(|p| p.has_machine_name(machine_name))
            .ok_or_else(|| BridgeError::ProjectNotFound(machine_name.to_string()))
    }

    /// Replace the in-memory collection and write it through
    fn commit(&mut self, candidate: Vec<Project>) -> Result<(), BridgeError> {
        self.projects = candidate;
        self.project_store.save(&self.projects).map_err(|e| {
            error!(error = %e, "Failed to persist projects, keeping in-memory state");
            BridgeError::Store(e)
        })
    }

    /// Save a whole collection sent by the UI
    pub fn save_projects(&mut self, mut candidate: Vec<Project>) -> Result<(), BridgeError> {
        validation::validate_collection(&candidate).inspect_err(|e| {
            warn!(error = %e, "Rejected project collection");
        })?;
        for project in &mut candidate {
            project.connection.clamp_refresh_interval();
        }
        normalize_active(&mut candidate);
        self.commit(candidate)
    }

    /// Same as `save_projects` for a display-named JSON document
    pub fn save_projects_display(&mut self, document: Value) -> Result<(), BridgeError> {
        let candidate = ProjectStore::from_display(document)?;
        self.save_projects(candidate)
    }

    /// Add a project with default connection settings. The first project
    /// becomes active.
    pub fn create_project(&mut self, display_name: &str, machine_name: &str) -> Result<(), BridgeError> {
        let display_name = display_name.trim();
        let machine_name = machine_name.trim();
        validation::validate_display_name(display_name)?;
        validation::validate_machine_name(machine_name)?;
        validation::ensure_unique(&self.projects, machine_name, None).inspect_err(|e| {
            warn!(error = %e, "Rejected new project");
        })?;

        let mut project = Project::new(display_name, machine_name);
        project.is_active = self.projects.is_empty();

        let mut candidate = self.projects.clone();
        candidate.push(project);
        info!(project = %machine_name, "Creating project");
        self.commit(candidate)
    }

    /// Only the display name is editable
    pub fn edit_project(&mut self, machine_name: &str, display_name: &str) -> Result<(), BridgeError> {
        let display_name = display_name.trim();
        validation::validate_display_name(display_name)?;
        let idx = self.position(machine_name)?;

        let mut candidate = self.projects.clone();
        candidate[idx].display_name = display_name.to_string();
        self.commit(candidate)
    }

    /// Make `machine_name` the only active project
    pub fn switch_active(&mut self, machine_name: &str) -> Result<(), BridgeError> {
        let idx = self.position(machine_name)?;

        let mut candidate = self.projects.clone();
        for (i, project) in candidate.iter_mut().enumerate() {
            project.is_active = i == idx;
        }
        info!(project = %candidate[idx].machine_name, "Switching active project");
        self.commit(candidate)
    }

    /// Remove an inactive project
    pub fn delete_project(&mut self, machine_name: &str) -> Result<Project, BridgeError> {
        let idx = self.position(machine_name)?;
        if self.projects[idx].is_active {
            let err = ValidationError::DeleteActive(self.projects[idx].machine_name.clone());
            warn!(error = %err, "Rejected delete");
            return Err(err.into());
        }

        let mut candidate = self.projects.clone();
        let removed = candidate.remove(idx);
        info!(project = %removed.machine_name, "Deleting project");
        self.commit(candidate)?;
        Ok(removed)
    }

    /// Settings of the active project, else the first, else defaults
    pub fn connection_settings(&self) -> ConnectionSettings {
        self.active_project()
            .or_else(|| self.projects.first())
            .map(|p| p.connection.clone())
            .unwrap_or_default()
    }

    /// Replace the connection settings of the active project (or the first
    /// one when none is active)
    pub fn save_connection_settings(&mut self, mut settings: ConnectionSettings) -> Result<(), BridgeError> {
        validation::validate_connection(&settings).inspect_err(|e| {
            warn!(error = %e, "Rejected connection settings");
        })?;
        settings.clamp_refresh_interval();

        let idx = match self.projects.iter().position(|p| p.is_active) {
            Some(idx) => idx,
            None if !self.projects.is_empty() => 0,
            None => return Err(BridgeError::NoProjectSelected),
        };

        let mut candidate = self.projects.clone();
        candidate[idx].connection = settings;
        self.commit(candidate)
    }

    pub fn save_app_settings(&mut self, settings: AppSettings) -> Result<(), BridgeError> {
        validation::validate_app_settings(&settings)?;
        self.settings = settings;
        self.settings_store.save(&self.settings).map_err(|e| {
            error!(error = %e, "Failed to persist settings, keeping in-memory state");
            BridgeError::Store(e)
        })
    }

    /// Import a project document from a file
    pub fn import_project(&mut self, path: &Path) -> Result<Project, BridgeError> {
        let document: Value = persistence::read_json(path).map_err(|e| match e {
            StoreError::Parse { source, .. } => {
                BridgeError::Validation(ValidationError::MalformedDocument(source.to_string()))
            }
            other => BridgeError::Store(other),
        })?;
        self.import_document(document)
    }

    /// Append an externally supplied project. It is only active if the
    /// collection was empty.
    pub fn import_document(&mut self, document: Value) -> Result<Project, BridgeError> {
        let mut project = transfer::parse_project_document(document)
            .and_then(|project| {
                validation::validate_project(&project)?;
                validation::ensure_unique(&self.projects, &project.machine_name, None)?;
                Ok(project)
            })
            .inspect_err(|e| warn!(error = %e, "Rejected import"))?;

        project.is_active = self.projects.is_empty();
        project.connection.clamp_refresh_interval();

        let mut candidate = self.projects.clone();
        candidate.push(project.clone());
        info!(project = %project.machine_name, "Importing project");
        self.commit(candidate)?;
        Ok(project)
    }

    /// Write the selected project, or the active one, to `dest`
    pub fn export_project(&self, selected: Option<&str>, dest: &Path) -> Result<&Project, BridgeError> {
        let project = match selected {
            Some(name) => &self.projects[self.position(name)?],
            None => self.active_project().ok_or(BridgeError::NoProjectSelected)?,
        };

        transfer::write_project_document(project, dest)?;
        info!(project = %project.machine_name, dest = %dest.display(), "Exported project");
        Ok(project)
    }

    /// Store a new dashboard refresh interval; returns the clamped value.
    ///
    /// With the project backing the value goes into the in-memory active
    /// project (or the first one) and is written through like any other edit.
    pub fn set_refresh_interval_ms(&mut self, ms: u64) -> Result<u64, BridgeError> {
        if self.interval_kind == IntervalBackingKind::Preferences {
            return Ok(self.interval.set_ms(ms)?);
        }

        let ms = clamp_refresh_interval(ms);
        let idx = match self.projects.iter().position(|p| p.is_active) {
            Some(idx) => idx,
            None if !self.projects.is_empty() => 0,
            None => return Err(BridgeError::NoProjectSelected),
        };

        let mut candidate = self.projects.clone();
        candidate[idx].connection.refresh_interval_ms = ms;
        info!(project = %candidate[idx].machine_name, refresh_interval_ms = ms, "Refresh interval updated");
        self.commit(candidate)?;
        Ok(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> Bridge {
        Bridge::open(&DataPaths::in_dir(dir.path()), IntervalBackingKind::Preferences, None)
    }

    fn active_count(bridge: &Bridge) -> usize {
        bridge.projects().iter().filter(|p| p.is_active).count()
    }

    fn import_doc(machine_name: &str) -> Value {
        json!({
            "name_cn": "导入",
            "name_en": machine_name,
            "is_active": true,
            "plc_settings": {
                "device_type": "S7",
                "byte_order": "ABCD",
                "heartbeat": 30,
                "timeout": 10000,
                "refresh_interval_ms": 500,
                "address": "192.168.1.30",
                "port": 102,
                "username": "",
                "password": ""
            }
        })
    }

    #[test]
    fn test_first_project_becomes_active() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);

        bridge.create_project("一号线", "lineA").unwrap();
        bridge.create_project("二号线", "lineB").unwrap();

        assert!(bridge.projects()[0].is_active);
        assert!(!bridge.projects()[1].is_active);

        let reopened = open(&dir);
        assert_eq!(reopened.projects(), bridge.projects());
    }

    #[test]
    fn test_duplicate_machine_name_rejected_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge.create_project("一号线", "lineA").unwrap();

        let err = bridge.create_project("另一个", "LINEA").unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Validation(ValidationError::DuplicateMachineName(_))
        ));
        assert_eq!(bridge.projects().len(), 1);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);

        assert!(bridge.create_project("", "lineA").is_err());
        assert!(bridge.create_project("ok", "line A").is_err());
        assert!(bridge.projects().is_empty());
        assert!(!DataPaths::in_dir(dir.path()).project_file().exists());
    }

    #[test]
    fn test_import_duplicate_rejected_and_collection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge.create_project("一号线", "lineA").unwrap();
        let before = bridge.projects().to_vec();

        let err = bridge.import_document(import_doc("lineA")).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Validation(ValidationError::DuplicateMachineName(_))
        ));
        assert_eq!(bridge.projects(), before.as_slice());
    }

    #[test]
    fn test_import_forced_inactive_when_collection_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge.create_project("一号线", "lineA").unwrap();

        let imported = bridge.import_document(import_doc("lineB")).unwrap();
        assert!(!imported.is_active);
        assert_eq!(imported.connection.refresh_interval_ms, 1000);
        assert_eq!(active_count(&bridge), 1);
        assert_eq!(bridge.active_project().unwrap().machine_name, "lineA");
    }

    #[test]
    fn test_import_into_empty_collection_is_active() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);

        let mut doc = import_doc("lineA");
        doc["is_active"] = json!(false);
        let imported = bridge.import_document(doc).unwrap();

        assert!(imported.is_active);
        assert_eq!(active_count(&bridge), 1);
    }

    #[test]
    fn test_import_malformed_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        let path = dir.path().join("incoming.json");
        fs::write(&path, r#"{"name_cn": "x", "name_en": "y"}"#).unwrap();

        assert!(matches!(
            bridge.import_project(&path),
            Err(BridgeError::Validation(ValidationError::MalformedDocument(_)))
        ));
        assert!(matches!(
            bridge.import_project(&dir.path().join("absent.json")),
            Err(BridgeError::Store(StoreError::NotFound(_)))
        ));
        assert!(bridge.projects().is_empty());
    }

    #[test]
    fn test_delete_active_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge.create_project("一号线", "lineA").unwrap();
        bridge.create_project("二号线", "lineB").unwrap();

        let err = bridge.delete_project("lineA").unwrap_err();
        assert!(matches!(err, BridgeError::Validation(ValidationError::DeleteActive(_))));
        assert_eq!(bridge.projects().len(), 2);

        let removed = bridge.delete_project("lineb").unwrap();
        assert_eq!(removed.machine_name, "lineB");
        assert_eq!(bridge.projects().len(), 1);
    }

    #[test]
    fn test_exactly_one_active_through_operations() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        assert_eq!(active_count(&bridge), 0);

        bridge.create_project("a", "a").unwrap();
        bridge.create_project("b", "b").unwrap();
        bridge.import_document(import_doc("c")).unwrap();
        assert_eq!(active_count(&bridge), 1);

        bridge.switch_active("c").unwrap();
        assert_eq!(active_count(&bridge), 1);
        assert_eq!(bridge.active_project().unwrap().machine_name, "c");

        bridge.delete_project("a").unwrap();
        bridge.delete_project("b").unwrap();
        assert_eq!(active_count(&bridge), 1);
        assert!(bridge.delete_project("c").is_err());
    }

    #[test]
    fn test_edit_changes_display_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge.create_project("旧名", "lineA").unwrap();

        bridge.edit_project("LINEA", "新名").unwrap();
        assert_eq!(bridge.projects()[0].display_name, "新名");
        assert_eq!(bridge.projects()[0].machine_name, "lineA");

        assert!(bridge.edit_project("lineA", " ").is_err());
        assert!(matches!(
            bridge.edit_project("ghost", "x"),
            Err(BridgeError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_connection_settings_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        assert_eq!(bridge.connection_settings(), ConnectionSettings::default());
        assert!(matches!(
            bridge.save_connection_settings(ConnectionSettings::default()),
            Err(BridgeError::NoProjectSelected)
        ));

        bridge.create_project("a", "a").unwrap();
        bridge.create_project("b", "b").unwrap();
        bridge.switch_active("b").unwrap();

        let mut patch = bridge.connection_settings();
        patch.host = "10.9.9.9".to_string();
        patch.refresh_interval_ms = 200;
        bridge.save_connection_settings(patch).unwrap();

        let active = bridge.active_project().unwrap();
        assert_eq!(active.connection.host, "10.9.9.9");
        assert_eq!(active.connection.refresh_interval_ms, 1000);
        assert_eq!(bridge.projects()[0].connection, ConnectionSettings::default());
    }

    #[test]
    fn test_invalid_connection_patch_leaves_storage_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge.create_project("a", "a").unwrap();
        let on_disk = fs::read_to_string(DataPaths::in_dir(dir.path()).project_file()).unwrap();

        let mut patch = bridge.connection_settings();
        patch.io_timeout_ms = 999;
        assert!(bridge.save_connection_settings(patch).is_err());

        assert_eq!(bridge.connection_settings(), ConnectionSettings::default());
        assert_eq!(
            fs::read_to_string(DataPaths::in_dir(dir.path()).project_file()).unwrap(),
            on_disk
        );
    }

    #[test]
    fn test_export_active_and_selected() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        let dest = dir.path().join("export.json");

        assert!(matches!(
            bridge.export_project(None, &dest),
            Err(BridgeError::NoProjectSelected)
        ));
        assert!(!dest.exists());

        bridge.create_project("一号线", "lineA").unwrap();
        bridge.create_project("二号线", "lineB").unwrap();

        bridge.export_project(None, &dest).unwrap();
        let written: Value = persistence::read_json(&dest).unwrap();
        assert_eq!(written["name_en"], "lineA");

        bridge.export_project(Some("lineB"), &dest).unwrap();
        let written: Value = persistence::read_json(&dest).unwrap();
        assert_eq!(written["name_en"], "lineB");
        assert_eq!(written["plc_settings"]["address"], "192.168.1.10");

        assert!(matches!(
            bridge.export_project(Some("lineC"), &dest),
            Err(BridgeError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_exported_document_imports_elsewhere() {
        let source_dir = tempfile::tempdir().unwrap();
        let target_dir = tempfile::tempdir().unwrap();
        let mut source = open(&source_dir);
        source.create_project("一号线", "lineA").unwrap();
        let dest = source_dir.path().join("lineA.json");
        source.export_project(None, &dest).unwrap();

        let mut target = open(&target_dir);
        target.create_project("本地", "local").unwrap();
        let imported = target.import_project(&dest).unwrap();

        assert_eq!(imported.display_name, "一号线");
        assert!(!imported.is_active);
    }

    #[test]
    fn test_save_projects_display_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);

        bridge
            .save_projects_display(json!([
                {"nameCN": "一号线", "nameEN": "lineA", "current": false},
                {"nameCN": "二号线", "nameEN": "lineB", "current": true,
                 "plcSettings": {"refresh_ms": 3000}}
            ]))
            .unwrap();

        assert_eq!(bridge.active_project().unwrap().machine_name, "lineB");
        assert_eq!(bridge.projects()[1].connection.refresh_interval_ms, 3000);

        let display = bridge.projects_display().unwrap();
        assert_eq!(display[1]["current"], json!(true));

        let err = bridge
            .save_projects_display(json!([
                {"nameCN": "a", "nameEN": "dup"},
                {"nameCN": "b", "nameEN": "DUP"}
            ]))
            .unwrap_err();
        assert!(matches!(err, BridgeError::Validation(_)));
        assert_eq!(bridge.projects().len(), 2);
    }

    #[test]
    fn test_save_projects_activates_first_when_none_active() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        bridge
            .save_projects(vec![Project::new("a", "a"), Project::new("b", "b")])
            .unwrap();
        assert!(bridge.projects()[0].is_active);
        assert_eq!(active_count(&bridge), 1);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the project file should be makes the rename fail
        let paths = DataPaths::in_dir(dir.path());
        fs::create_dir_all(paths.project_file()).unwrap();
        fs::write(paths.project_file().join("blocker"), "x").unwrap();

        let mut bridge = Bridge::open(&paths, IntervalBackingKind::Preferences, None);
        let err = bridge.create_project("a", "a").unwrap_err();

        assert!(matches!(err, BridgeError::Store(_)));
        assert_eq!(bridge.projects().len(), 1);
    }

    #[test]
    fn test_app_settings_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        assert_eq!(bridge.app_settings(), &AppSettings::default());

        let mut settings = bridge.app_settings().clone();
        settings.theme = crate::config::Theme::Dark;
        settings.refresh_interval_secs = 10;
        bridge.save_app_settings(settings.clone()).unwrap();

        assert_eq!(open(&dir).app_settings(), &settings);

        settings.refresh_interval_secs = 0;
        assert!(bridge.save_app_settings(settings).is_err());
        assert_eq!(bridge.app_settings().refresh_interval_secs, 10);
    }

    #[test]
    fn test_refresh_interval_with_project_backing_updates_memory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        let mut bridge = Bridge::open(&paths, IntervalBackingKind::Project, None);
        assert!(matches!(
            bridge.set_refresh_interval_ms(5000),
            Err(BridgeError::NoProjectSelected)
        ));

        bridge.create_project("a", "a").unwrap();
        assert_eq!(bridge.set_refresh_interval_ms(500).unwrap(), 1000);
        assert_eq!(bridge.refresh_interval().current_ms(), 1000);
        assert_eq!(bridge.connection_settings().refresh_interval_ms, 1000);
    }

    #[test]
    fn test_refresh_interval_after_failed_write_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        let mut bridge = Bridge::open(&paths, IntervalBackingKind::Project, None);
        bridge.create_project("a", "lineA").unwrap();

        // A non-empty directory at the temp path makes the next write fail
        let blocker = dir.path().join("project.json.tmp");
        fs::create_dir_all(&blocker).unwrap();
        fs::write(blocker.join("x"), "x").unwrap();
        assert!(matches!(bridge.create_project("b", "lineB"), Err(BridgeError::Store(_))));
        assert_eq!(bridge.projects().len(), 2);

        fs::remove_dir_all(&blocker).unwrap();
        assert_eq!(bridge.set_refresh_interval_ms(5000).unwrap(), 5000);

        let names: Vec<&str> = bridge.projects().iter().map(|p| p.machine_name.as_str()).collect();
        assert_eq!(names, vec!["lineA", "lineB"]);
        assert_eq!(bridge.connection_settings().refresh_interval_ms, 5000);

        let reopened = Bridge::open(&paths, IntervalBackingKind::Project, None);
        assert_eq!(reopened.projects().len(), 2);
        assert_eq!(reopened.refresh_interval().current_ms(), 5000);
    }

    #[test]
    fn test_import_non_json_file_is_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        let path = dir.path().join("incoming.json");
        fs::write(&path, "name_en = lineA").unwrap();

        assert!(matches!(
            bridge.import_project(&path),
            Err(BridgeError::Validation(ValidationError::MalformedDocument(_)))
        ));
        assert!(bridge.projects().is_empty());
    }

    #[test]
    fn test_refresh_interval_with_preference_backing() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = open(&dir);
        assert_eq!(bridge.refresh_interval().current_ms(), 60_000);

        bridge.set_refresh_interval_ms(15_000).unwrap();
        assert_eq!(bridge.refresh_interval().current_ms(), 15_000);
        assert_eq!(bridge.refresh_interval().backing_name(), "preferences");
    }
}
