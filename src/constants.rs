//! File names, environment keys, defaults and limits
//!
//! Grouped by the part of the dashboard that reads them.

/// File locations and directory names
pub mod config {
    /// Directory under the platform config dir holding project and settings files
    pub const APP_DIR: &str = "plc-dashboard";

    /// Project collection file (JSON array)
    pub const PROJECT_FILENAME: &str = "project.json";

    /// App-level preferences file (JSON object)
    pub const SETTINGS_FILENAME: &str = "settings.json";

    /// Organization directory of the platform preference store
    pub const PREFERENCES_ORG_DIR: &str = "PLCApp";

    /// Key-value preference file inside the organization directory
    pub const PREFERENCES_FILENAME: &str = "PLC.json";

    /// Indentation used for every JSON file we write
    pub const JSON_INDENT: &[u8] = b"    ";
}

/// Environment variables consulted at startup
pub mod env {
    /// Log level filter (trace, debug, info, warn, error)
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Overrides the data directory
    pub const DATA_DIR: &str = "PLC_DASHBOARD_DIR";

    /// Selects the refresh interval backing (preferences or project)
    pub const INTERVAL_BACKING: &str = "PLC_INTERVAL_BACKING";

    /// Refresh interval used when the primary backing is unavailable
    pub const REFRESH_INTERVAL_MS: &str = "PLC_REFRESH_INTERVAL_MS";
}

/// Keys of the platform preference store
pub mod preferences {
    pub const REFRESH_INTERVAL_MS: &str = "refresh_interval_ms";
}

/// Connection settings defaults and accepted ranges
pub mod connection {
    pub const DEFAULT_HEARTBEAT: u32 = 30;
    pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;
    pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;
    pub const DEFAULT_HOST: &str = "192.168.1.10";
    pub const DEFAULT_PORT: u16 = 102;

    pub const MIN_HEARTBEAT: u32 = 1;
    pub const MAX_HEARTBEAT: u32 = 1000;

    pub const MIN_TIMEOUT_MS: u32 = 1000;
    pub const MAX_TIMEOUT_MS: u32 = 30_000;

    /// Floor for every refresh interval; lower values are raised, never rejected.
    /// No ceiling is enforced.
    pub const MIN_REFRESH_INTERVAL_MS: u64 = 1000;
}

/// App settings defaults
pub mod settings {
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 5;
    pub const DEFAULT_AUTO_SAVE_LOGS: bool = true;
    pub const DEFAULT_ENABLE_NOTIFICATIONS: bool = true;
}

/// Simulated dashboard metrics
pub mod dashboard {
    /// Chance that any single gauge is touched on a tick
    pub const PERTURB_PROBABILITY: f64 = 0.5;

    /// Chance that a tick advances the ring counter
    pub const RING_ADVANCE_PROBABILITY: f64 = 0.1;

    /// Number of rings kept in the rolling window
    pub const RING_WINDOW: usize = 10;

    pub const STATUS_MAX: u8 = 2;
    pub const DEFAULT_STATUS: u8 = 1;

    pub const ADVANCE_STROKE_DEFAULT: i32 = 75;
    pub const ADVANCE_STROKE_RANGE: (i32, i32) = (0, 100);
    pub const ADVANCE_STROKE_DELTA: i32 = 10;

    pub const INSTANT_OUTPUT_DEFAULT: i32 = 42;
    pub const INSTANT_OUTPUT_RANGE: (i32, i32) = (0, 100);
    pub const INSTANT_OUTPUT_DELTA: i32 = 15;

    pub const RING_OUTPUT_DEFAULT: i32 = 128;
    pub const RING_OUTPUT_RANGE: (i32, i32) = (0, 200);
    pub const RING_OUTPUT_DELTA: i32 = 20;

    /// Output per ring for the initial window (oldest first)
    pub const INITIAL_RING_OUTPUTS: [i32; RING_WINDOW] =
        [121, 134, 118, 140, 127, 131, 125, 138, 122, 128];

    /// Poll granularity of the run loop while waiting for the next tick
    pub const POLL_INTERVAL_MS: u64 = 100;
}
