//! Error types
//!
//! Every step of a run returns [`ActionError`]. Only `main` turns it into a
//! process exit status.

use thiserror::Error;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required input was absent or blank.
    #[error("Input required and not supplied: {0}")]
    MissingRequiredInput(String),

    /// The resource type label is not in the endpoint map.
    #[error("Unsupported resourceType: {given}. Allowed: {allowed}")]
    UnsupportedResourceType { given: String, allowed: String },

    /// The CMDB base URL could not be parsed.
    #[error("Invalid enov8_url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The CMDB answered with a status outside 200..300.
    #[error("HTTP {status} - {body}")]
    HttpStatus { status: u16, body: String },

    /// Connection-level failure (DNS, refused, TLS handshake, reset).
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// No complete response within the configured bound.
    #[error("Timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing step outputs failed.
    #[error("Failed to write step output: {0}")]
    Output(#[from] std::io::Error),
}

impl ActionError {
    /// HTTP status carried by the error, if the CMDB responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ActionError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures detected before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ActionError::MissingRequiredInput(_)
                | ActionError::UnsupportedResourceType { .. }
                | ActionError::InvalidUrl { .. }
                | ActionError::InvalidHeader { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_cause() {
        let err = ActionError::MissingRequiredInput("app_key".to_string());
        assert_eq!(err.to_string(), "Input required and not supplied: app_key");

        let err = ActionError::HttpStatus {
            status: 404,
            body: r#"{"error":"not found"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"HTTP 404 - {"error":"not found"}"#);
        assert_eq!(err.status(), Some(404));

        let err = ActionError::Timeout { timeout_ms: 20000 };
        assert_eq!(err.to_string(), "Timeout after 20000ms");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_validation_errors() {
        assert!(ActionError::MissingRequiredInput("version".to_string()).is_validation());
        assert!(!ActionError::Timeout { timeout_ms: 1 }.is_validation());
    }
}
