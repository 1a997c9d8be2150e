//! Configuration constants for the proffy core

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Proffy/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}

/// Local storage configuration
pub mod storage {
    /// Key under which the favorites list is stored (JSON array of teachers)
    pub const FAVORITES_KEY: &str = "favorites";
}

/// Search filter defaults
pub mod filters {
    /// Subject pre-filled in the search form
    pub const DEFAULT_SUBJECT: &str = "Matemática";

    /// Week day pre-selected in the search form (1 = Domingo)
    pub const DEFAULT_WEEK_DAY: u8 = 1;

    /// Display/query format for the time-of-day filter (zero-padded 24h)
    pub const TIME_FORMAT: &str = "%H:%M";
}
