//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Hearth
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum HearthError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing credential for a vendor. Resolved by returning empty or mock
    /// data, never surfaced to the user as a failure.
    #[error("Vendor not configured: {0}")]
    NotConfigured(String),

    /// A 4xx/5xx response from a vendor control or list call.
    #[error("Vendor rejected request: {0}")]
    VendorRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Hearth operations
pub type Result<T> = std::result::Result<T, HearthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_serialize_with_type_tag() {
        let err = HearthError::NotConfigured("spotify".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "NotConfigured");
        assert_eq!(json["message"], "spotify");
    }

    #[test]
    fn display_includes_detail() {
        let err = HearthError::VendorRejected("HTTP 404 Not Found".into());
        assert!(err.to_string().contains("404"));
    }
}
