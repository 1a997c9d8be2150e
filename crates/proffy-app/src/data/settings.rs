//! Application settings
//!
//! User preferences persisted next to the key-value store.

use crate::config::api::DEFAULT_BASE_URL;
use crate::config::files::SETTINGS_FILE;
use crate::data::storage;
use crate::error::{AppError, Result};
use proffy::config::filters::DEFAULT_SUBJECT;
use proffy::model::WeekDay;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Backend base URL (the classes endpoint is resolved against it)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Subject pre-filled in the search form
    #[serde(default = "default_subject")]
    pub default_subject: String,

    /// Week day pre-selected in the search form
    #[serde(default)]
    pub default_week_day: WeekDay,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api_base_url: default_api_base_url(),
            default_subject: default_subject(),
            default_week_day: WeekDay::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `settings.json` from `dir`
    ///
    /// An unreadable or invalid file is logged and replaced by the defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(storage::load_from::<Settings>(path)?.unwrap_or_default())
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Set the backend URL, rejecting anything that is not http(s)
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API URL must start with http:// or https://, got {url:?}"
            )));
        }
        self.api_base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }
}
