//! Structured errors for backend calls.

use std::fmt;

use serde_json::Value;

/// Categories of backend errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP status error (4xx, 5xx)
    Status,
    /// The request could not be sent or no response arrived (connect, DNS,
    /// timeout, request construction)
    Transport,
    /// Failed to parse the response body
    Decode,
}

/// Error from a backend call, keeping the status and raw body around so
/// callers can surface the server-supplied message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status, when a response arrived
    pub status: Option<u16>,
    /// Raw response body, when a response arrived
    pub body: Option<String>,
}

impl ApiError {
    /// Creates an HTTP status error, folding any server message into the
    /// summary.
    pub fn status(status: u16, body: &str) -> Self {
        let message = match extract_server_message(body) {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ApiErrorKind::Status,
            message,
            status: Some(status),
            body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Creates a transport error (no response to preserve).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// The `message` field of the server's JSON error body, when present.
    pub fn server_message(&self) -> Option<String> {
        self.body.as_deref().and_then(extract_server_message)
    }

    /// True when the response carried HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for backend operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The backend reports failures as `{"message": "..."}`.
fn extract_server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_extracts_server_message() {
        let error = ApiError::status(400, r#"{"message": "Título obrigatório"}"#);
        assert_eq!(error.kind, ApiErrorKind::Status);
        assert_eq!(error.message, "HTTP 400: Título obrigatório");
        assert_eq!(error.status, Some(400));
        assert_eq!(error.server_message().as_deref(), Some("Título obrigatório"));
    }

    #[test]
    fn test_status_error_keeps_non_json_body() {
        let error = ApiError::status(502, "Bad Gateway");
        assert_eq!(error.message, "HTTP 502");
        assert_eq!(error.body.as_deref(), Some("Bad Gateway"));
        assert_eq!(error.server_message(), None);
    }

    #[test]
    fn test_status_error_with_empty_body() {
        let error = ApiError::status(500, "");
        assert_eq!(error.message, "HTTP 500");
        assert_eq!(error.body, None);
    }

    #[test]
    fn test_is_unauthorized_only_for_401() {
        assert!(ApiError::status(401, "").is_unauthorized());
        assert!(!ApiError::status(403, "").is_unauthorized());
        assert!(!ApiError::transport("connection refused").is_unauthorized());
    }

    #[test]
    fn test_display_shows_summary() {
        let error = ApiError::transport("connection refused");
        assert_eq!(error.to_string(), "connection refused");
    }
}
