//! Display ⇄ storage key translation for project documents
//!
//! The presentation layer names project fields `nameCN`, `nameEN`, `current`
//! and `plcSettings`; the project file uses `name_cn`, `name_en`, `is_active`
//! and `plc_settings`. Connection settings differ only in the refresh key.
//! Keys missing from the tables pass through untouched.

use serde_json::{Map, Value};

/// (display, storage) pairs for top-level project keys
pub const PROJECT_FIELDS: &[(&str, &str)] = &[
    ("nameCN", "name_cn"),
    ("nameEN", "name_en"),
    ("current", "is_active"),
    ("plcSettings", "plc_settings"),
];

/// (display, storage) pairs for the nested connection settings object
pub const CONNECTION_FIELDS: &[(&str, &str)] = &[
    ("device_type", "device_type"),
    ("byte_order", "byte_order"),
    ("heartbeat", "heartbeat"),
    ("timeout", "timeout"),
    ("refresh_ms", "refresh_interval_ms"),
    ("address", "address"),
    ("port", "port"),
    ("username", "username"),
    ("password", "password"),
];

const CONNECTION_DISPLAY_KEY: &str = "plcSettings";
const CONNECTION_STORAGE_KEY: &str = "plc_settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToStorage,
    ToDisplay,
}

impl Direction {
    fn rename(self, table: &[(&str, &str)], key: &str) -> String {
        let hit = table.iter().find_map(|&(display, storage)| match self {
            Direction::ToStorage if display == key => Some(storage),
            Direction::ToDisplay if storage == key => Some(display),
            _ => None,
        });
        hit.unwrap_or(key).to_string()
    }

    fn connection_key(self) -> &'static str {
        match self {
            Direction::ToStorage => CONNECTION_STORAGE_KEY,
            Direction::ToDisplay => CONNECTION_DISPLAY_KEY,
        }
    }
}

fn remap_object(map: Map<String, Value>, table: &[(&str, &str)], direction: Direction) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (direction.rename(table, &key), value))
        .collect()
}

/// Translate one project object
pub fn remap_project(value: Value, direction: Direction) -> Value {
    let Value::Object(map) = value else {
        return value;
    };

    let mut out = remap_object(map, PROJECT_FIELDS, direction);
    if let Some(Value::Object(nested)) = out.remove(direction.connection_key()) {
        out.insert(
            direction.connection_key().to_string(),
            Value::Object(remap_object(nested, CONNECTION_FIELDS, direction)),
        );
    }
    Value::Object(out)
}

/// Translate a project array; a bare object is treated as a single project
pub fn remap_collection(value: Value, direction: Direction) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| remap_project(item, direction))
                .collect(),
        ),
        other => remap_project(other, direction),
    }
}
