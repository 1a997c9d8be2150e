//! Error types for the proffy core
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the proffy core
#[derive(Error, Debug)]
pub enum ProffyError {
    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid week day: {0} (expected 1-7)")]
    InvalidWeekDay(u8),

    #[error("Invalid time: {0:?} (expected HH:mm)")]
    InvalidTime(String),
}

/// Result type alias for the proffy core
pub type Result<T> = std::result::Result<T, ProffyError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if let Some(status) = e.status() {
        return format!("Server responded with {status}");
    }
    if e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}
