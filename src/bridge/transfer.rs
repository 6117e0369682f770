//! Single-project documents exchanged with other stations
//!
//! Unlike the project file, an import document must be complete: every key
//! of the project and of its nine connection settings has to be present with
//! the right JSON type.

use serde_json::Value;
use std::path::Path;

use super::validation::ValidationError;
use crate::config::Project;
use crate::persistence::{self, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    Bool,
    Integer,
    Object,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Bool => value.is_boolean(),
            Kind::Integer => value.is_i64() || value.is_u64(),
            Kind::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::Bool => "a boolean",
            Kind::Integer => "an integer",
            Kind::Object => "an object",
        }
    }
}

const PROJECT_SCHEMA: &[(&str, Kind)] = &[
    ("name_cn", Kind::String),
    ("name_en", Kind::String),
    ("is_active", Kind::Bool),
    ("plc_settings", Kind::Object),
];

const CONNECTION_SCHEMA: &[(&str, Kind)] = &[
    ("device_type", Kind::String),
    ("byte_order", Kind::String),
    ("heartbeat", Kind::Integer),
    ("timeout", Kind::Integer),
    ("refresh_interval_ms", Kind::Integer),
    ("address", Kind::String),
    ("port", Kind::Integer),
    ("username", Kind::String),
    ("password", Kind::String),
];

fn check_keys(value: &Value, schema: &[(&str, Kind)], prefix: &str) -> Result<(), ValidationError> {
    let Some(map) = value.as_object() else {
        let what = if prefix.is_empty() { "document" } else { prefix.trim_end_matches('.') };
        return Err(ValidationError::MalformedDocument(format!("{what} must be a JSON object")));
    };

    for &(key, kind) in schema {
        match map.get(key) {
            None => {
                return Err(ValidationError::MalformedDocument(format!("missing key '{prefix}{key}'")));
            }
            Some(v) if !kind.matches(v) => {
                return Err(ValidationError::MalformedDocument(format!(
                    "'{prefix}{key}' must be {}",
                    kind.name()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Check the full project shape, then decode it
pub fn parse_project_document(document: Value) -> Result<Project, ValidationError> {
    check_keys(&document, PROJECT_SCHEMA, "")?;
    check_keys(&document["plc_settings"], CONNECTION_SCHEMA, "plc_settings.")?;

    // Shape is right; enum values and integer widths can still be off
    serde_json::from_value(document)
        .map_err(|e| ValidationError::MalformedDocument(e.to_string()))
}

/// Write `project` in the storage schema to `dest`
pub fn write_project_document(project: &Project, dest: &Path) -> Result<(), StoreError> {
    persistence::write_json(dest, project, "project export")
}
