//! Error types for proffy app services
//!
//! Application-level errors that wrap core errors and add app-specific variants.

use proffy::error::ProffyError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] ProffyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Could not read favorites: {0}")]
    Favorites(String),

    #[error("Search failed: server responded with {status}")]
    Api { status: u16 },
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Core(ProffyError::Network(e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Core(ProffyError::Io(e))
    }
}

/// Result type alias for proffy app services
pub type Result<T> = std::result::Result<T, AppError>;
