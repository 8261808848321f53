//! Typed errors for the directory client.
//!
//! Uses `thiserror` for library errors so form handlers can match on the
//! failure kind and show the right message.

use thiserror::Error;

/// Errors that can occur while talking to the directory backend or
/// persisting session state.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Bad credentials, or a token the backend no longer accepts
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Registration or login input rejected as malformed or duplicate
    #[error("validation failed: {0}")]
    Validation(String),

    /// Backend unreachable, connection reset, timeout
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// Durable token storage failed
    #[error("storage error: {0}")]
    Storage(String),
}

impl DirectoryError {
    /// True when the failure means the credential is bad or expired.
    pub fn is_authentication(&self) -> bool {
        matches!(self, DirectoryError::Authentication(_))
    }

    /// True when the failure came from the transport rather than the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, DirectoryError::Network(_))
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DirectoryError::Parse(err.to_string())
        } else {
            DirectoryError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        DirectoryError::Storage(err.to_string())
    }
}

/// Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_helpers() {
        assert!(DirectoryError::Authentication("expired".into()).is_authentication());
        assert!(!DirectoryError::Validation("email taken".into()).is_authentication());
        assert!(DirectoryError::Network("refused".into()).is_network());
    }

    #[test]
    fn test_api_error_display() {
        let err = DirectoryError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }
}
