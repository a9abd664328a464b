//! Canvas API error types.

use thiserror::Error;

/// Errors surfaced by the Canvas API client.
///
/// Each failure kind is a distinct variant so callers handle every case
/// explicitly. The client performs no retry or local recovery; a failed
/// round-trip surfaces directly to the calling tool.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The API token is empty. Checked before any request is sent.
    #[error("CANVAS_API_TOKEN is not set")]
    MissingToken,

    /// A verb outside GET/POST/PUT/DELETE was requested.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Network failure, timeout, or an undecodable response body.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Canvas responded with a non-2xx status. Carries the response body
    /// for diagnostics.
    #[error("Canvas API returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl CanvasError {
    /// The upstream status code, when this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure is a configuration problem rather than a
    /// request-level one.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = CanvasError::Status {
            status: 404,
            body: "{\"errors\": \"not found\"}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(CanvasError::MissingToken.status(), None);
    }

    #[test]
    fn test_configuration_classification() {
        assert!(CanvasError::MissingToken.is_configuration());
        assert!(!CanvasError::UnsupportedMethod("PATCH".to_string()).is_configuration());
    }

    #[test]
    fn test_display_carries_diagnostics() {
        let err = CanvasError::Status {
            status: 403,
            body: "forbidden".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("forbidden"));
    }
}
