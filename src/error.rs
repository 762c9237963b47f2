//! Error types for car_watch

use std::fmt;

/// Unified error type for car_watch operations
#[derive(Debug)]
pub enum WatchError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON (inventory response or snapshot file)
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Snapshot file read/write failed
    Io(std::io::Error),
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchError::Network(e) => write!(f, "Network error: {}", e),
            WatchError::Parse(e) => write!(f, "Parse error: {}", e),
            WatchError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            WatchError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for WatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WatchError::Network(e) => Some(e),
            WatchError::Parse(e) => Some(e),
            WatchError::HttpStatus(_) => None,
            WatchError::Io(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for WatchError {
    fn from(err: reqwest::Error) -> Self {
        WatchError::Network(err)
    }
}

impl From<serde_json::Error> for WatchError {
    fn from(err: serde_json::Error) -> Self {
        WatchError::Parse(err)
    }
}

impl From<std::io::Error> for WatchError {
    fn from(err: std::io::Error) -> Self {
        WatchError::Io(err)
    }
}

/// Result alias for car_watch operations
pub type Result<T> = std::result::Result<T, WatchError>;
