//! JSON file persistence
//!
//! Path resolution and file I/O shared by the key-value store and settings.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-user config directory for the app
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|p| p.join(NAME)).ok_or_else(|| {
        AppError::Config(
            "Could not determine config directory. HOME environment variable may not be set."
                .to_string(),
        )
    })
}

/// Config directory, created if missing
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    create_dir_all(&dir)?;
    Ok(dir)
}

// =============================================================================
// Path-based functions
// =============================================================================

pub(crate) fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        AppError::Storage(match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot create directory {:?}", path)
            }
            _ => format!("Failed to create directory {:?}: {}", path, e),
        })
    })
}

/// Read a whole file; a missing file is `None`
fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
            "Permission denied: cannot read {:?}",
            path
        ))),
        Err(e) => Err(AppError::Storage(format!("Failed to read {:?}: {}", path, e))),
    }
}

/// Write through a sibling temp file so a crash never leaves half a document
fn write_file(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let describe = |e: std::io::Error| {
        AppError::Storage(match e.kind() {
            ErrorKind::PermissionDenied => format!("Permission denied: cannot write to {:?}", path),
            ErrorKind::ReadOnlyFilesystem => {
                format!("Cannot write to {:?}: filesystem is read-only", path)
            }
            _ => format!("Failed to write to {:?}: {}", path, e),
        })
    };
    fs::write(&tmp, content).map_err(&describe)?;
    fs::rename(&tmp, path).map_err(&describe)
}

/// Load a JSON document
///
/// Missing and blank files are `None`; unparsable content is an error.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(content) = read_file(path)? else {
        return Ok(None);
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("Failed to parse {:?}: {}", path, e)))?;
    debug!(path = %path.display(), "loaded json document");
    Ok(Some(data))
}

/// Save a JSON document, creating parent directories as needed
pub fn save_to<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_file(path, &content)?;
    debug!(path = %path.display(), "saved json document");
    Ok(())
}
