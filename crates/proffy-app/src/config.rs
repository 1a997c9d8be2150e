//! Configuration constants for proffy app services

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "proffy";
}

/// API-related configuration
pub mod api {
    /// Default backend base URL
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

    /// Search endpoint path, relative to the base URL
    pub const CLASSES_PATH: &str = "classes";
}

/// Data file names inside the config directory
pub mod files {
    /// Key-value store backing the favorites list
    pub const STORE_FILE: &str = "storage.json";

    /// User settings
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Default log file
    pub const LOG_FILE: &str = "proffy.log";
}
