//! Rules every project, connection patch and settings change must pass
//! before anything reaches disk

use thiserror::Error;

use crate::config::{AppSettings, ConnectionSettings, Project};
use crate::constants::connection::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("machine name '{0}' may only contain ASCII letters, digits and '_'")]
    InvalidMachineName(String),

    #[error("machine name '{0}' is already used by another project")]
    DuplicateMachineName(String),

    #[error("host must not be empty")]
    EmptyHost,

    #[error("port must not be 0")]
    ZeroPort,

    #[error("heartbeat {value} is outside {min}..={max}")]
    HeartbeatOutOfRange { value: u32, min: u32, max: u32 },

    #[error("timeout {value} ms is outside {min}..={max}")]
    TimeoutOutOfRange { value: u32, min: u32, max: u32 },

    #[error("refresh interval must be at least 1 second")]
    ZeroRefreshInterval,

    #[error("{0} projects are marked active, at most one may be")]
    MultipleActive(usize),

    #[error("project '{0}' is active and cannot be deleted")]
    DeleteActive(String),

    #[error("import document is malformed: {0}")]
    MalformedDocument(String),
}

pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyDisplayName);
    }
    Ok(())
}

/// `[A-Za-z0-9_]+`
pub fn validate_machine_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidMachineName(name.to_string()));
    }
    Ok(())
}

/// Reject `machine_name` if any project other than the one at `skip` has it
pub fn ensure_unique(
    projects: &[Project],
    machine_name: &str,
    skip: Option<usize>,
) -> Result<(), ValidationError> {
    let clash = projects
        .iter()
        .enumerate()
        .any(|(idx, p)| Some(idx) != skip && p.has_machine_name(machine_name));
    if clash {
        return Err(ValidationError::DuplicateMachineName(machine_name.to_string()));
    }
    Ok(())
}

/// Host, port and numeric ranges. The refresh interval is clamped elsewhere,
/// never rejected.
pub fn validate_connection(settings: &ConnectionSettings) -> Result<(), ValidationError> {
    if settings.host.trim().is_empty() {
        return Err(ValidationError::EmptyHost);
    }
    if settings.port == 0 {
        return Err(ValidationError::ZeroPort);
    }
    if !(MIN_HEARTBEAT..=MAX_HEARTBEAT).contains(&settings.heartbeat_period) {
        return Err(ValidationError::HeartbeatOutOfRange {
            value: settings.heartbeat_period,
            min: MIN_HEARTBEAT,
            max: MAX_HEARTBEAT,
        });
    }
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&settings.io_timeout_ms) {
        return Err(ValidationError::TimeoutOutOfRange {
            value: settings.io_timeout_ms,
            min: MIN_TIMEOUT_MS,
            max: MAX_TIMEOUT_MS,
        });
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    validate_display_name(&project.display_name)?;
    validate_machine_name(&project.machine_name)?;
    validate_connection(&project.connection)
}

/// Every project valid, machine names unique, at most one active
pub fn validate_collection(projects: &[Project]) -> Result<(), ValidationError> {
    for (idx, project) in projects.iter().enumerate() {
        validate_project(project)?;
        ensure_unique(&projects[..idx], &project.machine_name, None)?;
    }

    let active = projects.iter().filter(|p| p.is_active).count();
    if active > 1 {
        return Err(ValidationError::MultipleActive(active));
    }
    Ok(())
}

pub fn validate_app_settings(settings: &AppSettings) -> Result<(), ValidationError> {
    if settings.refresh_interval_secs == 0 {
        return Err(ValidationError::ZeroRefreshInterval);
    }
    Ok(())
}
