//! Error types for the bangumi importer
//!
//! Field extraction never fails; errors only come from the network,
//! from invalid user input, or from serialization.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all bangumi importer operations
///
/// Implements Display for human-readable messages and Serialize
/// so the CLI can emit errors as JSON.
#[derive(Error, Debug)]
pub enum BangumiError {
    /// HTTP request failed (connect error, timeout, broken body)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Empty subject id or search keyword
    #[error("Invalid subject ID: {0}")]
    InvalidId(String),

    /// Watch status outside the fixed set
    #[error("Invalid status: {0} (expected one of unprepared, planned, watching, abandoned, finished)")]
    InvalidStatus(String),

    /// Record could not be serialized
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BangumiError {
    /// Whether the error came from the network and is worth a manual retry
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            BangumiError::HttpError(_) | BangumiError::HttpStatus { .. }
        )
    }
}

impl Serialize for BangumiError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for bangumi importer operations
pub type Result<T> = std::result::Result<T, BangumiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_http_status() {
        let error = BangumiError::HttpStatus {
            status: 404,
            url: "https://chii.in/subject/1".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 404 for https://chii.in/subject/1");
    }

    #[test]
    fn test_error_display_invalid_url() {
        let error = BangumiError::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid URL: not-a-url");
    }

    #[test]
    fn test_error_display_invalid_status() {
        let error = BangumiError::InvalidStatus("dropped".to_string());
        assert!(error.to_string().starts_with("Invalid status: dropped"));
    }

    #[test]
    fn test_is_network() {
        let status = BangumiError::HttpStatus {
            status: 503,
            url: "https://chii.in".to_string(),
        };
        assert!(status.is_network());
        assert!(!BangumiError::InvalidId(String::new()).is_network());
        assert!(!BangumiError::InvalidUrl("ftp://chii.in".to_string()).is_network());
    }

    #[test]
    fn test_error_serialize() {
        let error = BangumiError::InvalidId("".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Invalid subject ID: \"");
    }
}
