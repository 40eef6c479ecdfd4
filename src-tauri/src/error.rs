use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failed analysis submission.
///
/// Matched structurally by the workflow and the display layer; the `Display`
/// strings are the user-facing failure text.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UploadError {
    /// A connection to the analysis service could not be established.
    #[error("Network connection failed. Please check your internet connection.")]
    NetworkUnavailable,

    /// The request exceeded the fixed wait bound.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// A success status arrived but the body was not a readable result.
    #[error("The analysis service returned an unreadable response.")]
    MalformedResponse,

    /// Anything the other variants do not cover.
    #[error("An unexpected error occurred during analysis: {0}")]
    Unknown(String),
}

impl UploadError {
    /// Build a `ServerError` from a non-success response.
    ///
    /// The message is taken from the body's `message` field (or FastAPI-style
    /// `detail`) when present, else a generic string carrying the status.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message").or_else(|| v.get("detail")))
            .and_then(|m| m.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("server error (HTTP {})", status));
        UploadError::ServerError { status, message }
    }
}

impl From<UploadError> for String {
    fn from(err: UploadError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_message_field() {
        let err = UploadError::from_status(500, r#"{"message":"model unavailable"}"#);
        assert_eq!(
            err,
            UploadError::ServerError {
                status: 500,
                message: "model unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_from_status_falls_back_to_detail_field() {
        let err = UploadError::from_status(400, r#"{"detail":"File must be an image"}"#);
        assert_eq!(
            err,
            UploadError::ServerError {
                status: 400,
                message: "File must be an image".to_string()
            }
        );
    }

    #[test]
    fn test_from_status_generic_for_unreadable_body() {
        let err = UploadError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(
            err,
            UploadError::ServerError {
                status: 502,
                message: "server error (HTTP 502)".to_string()
            }
        );
    }

    #[test]
    fn test_display_carries_server_message() {
        let err = UploadError::from_status(500, r#"{"message":"model unavailable"}"#);
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn test_serialized_tag_is_stable() {
        let json = serde_json::to_string(&UploadError::Timeout).unwrap();
        assert!(json.contains(r#""kind":"timeout""#), "got: {}", json);

        let json = serde_json::to_string(&UploadError::ServerError {
            status: 500,
            message: "boom".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""kind":"server_error""#), "got: {}", json);
        assert!(json.contains(r#""status":500"#), "got: {}", json);
    }
}
