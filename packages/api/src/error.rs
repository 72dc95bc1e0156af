//! # The single failure shape of the API client
//!
//! Every request either yields its payload or an [`ApiError`]. UI code has
//! one handling path: show [`ApiError`]'s `Display` text, optionally branch on
//! [`ApiError::kind`].
//!
//! | Variant | When | `status()` / `status_text()` |
//! |---------|------|------------------------------|
//! | [`ApiError::Http`] | non-2xx response | response status |
//! | [`ApiError::Validation`] | non-empty `validationErrors`, on any status | response status |
//! | [`ApiError::Network`] | no response reached the client | `0` / `"Network Error"` |
//! | [`ApiError::Unknown`] | anything else (undecodable body, ...) | `0` / `"Unknown Error"` |
//!
//! For HTTP errors the message is taken from the JSON body's `message`, then
//! its `error`, then the raw body text, then the status text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please check if the backend is running.";
pub const NETWORK_STATUS_TEXT: &str = "Network Error";
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Error";

/// A server-reported problem with one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub property: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Http,
    Validation,
    Network,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Http {
        status: u16,
        status_text: String,
        message: String,
    },
    #[error("Validation failed: {}", join_field_errors(.errors))]
    Validation {
        status: u16,
        status_text: String,
        errors: Vec<FieldError>,
    },
    #[error("{message}")]
    Network { message: String },
    #[error("{message}")]
    Unknown { message: String },
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Http { .. } => ApiErrorKind::Http,
            Self::Validation { .. } => ApiErrorKind::Validation,
            Self::Network { .. } => ApiErrorKind::Network,
            Self::Unknown { .. } => ApiErrorKind::Unknown,
        }
    }

    /// HTTP status, or `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } | Self::Validation { status, .. } => *status,
            Self::Network { .. } | Self::Unknown { .. } => 0,
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            Self::Http { status_text, .. } | Self::Validation { status_text, .. } => status_text,
            Self::Network { .. } => NETWORK_STATUS_TEXT,
            Self::Unknown { .. } => UNKNOWN_STATUS_TEXT,
        }
    }

    /// The server rejected the bearer token (or there was none).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

        if let Some(errors) = parsed
            .as_ref()
            .and_then(|b| b.validation_errors.clone())
            .filter(|errors| !errors.is_empty())
        {
            return Self::Validation {
                status,
                status_text: status_text.to_string(),
                errors,
            };
        }

        let message = parsed
            .and_then(|b| b.message.as_ref().and_then(text_of).or_else(|| b.error.as_ref().and_then(text_of)))
            .or_else(|| (!body.trim().is_empty()).then(|| body.to_string()))
            .unwrap_or_else(|| status_text.to_string());

        Self::Http {
            status,
            status_text: status_text.to_string(),
            message,
        }
    }
}

/// Loose view of an error body; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    validation_errors: Option<Vec<FieldError>>,
}

/// Message text from a JSON value; servers send either a string or a list of strings.
fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

pub(crate) fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.property, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_wins() {
        let err = ApiError::from_response(
            404,
            "Not Found",
            r#"{"message":"Task not found","error":"Not Found"}"#,
        );
        assert_eq!(err.to_string(), "Task not found");
        assert_eq!(err.status(), 404);
        assert_eq!(err.status_text(), "Not Found");
        assert_eq!(err.kind(), ApiErrorKind::Http);
    }

    #[test]
    fn error_field_is_second_choice() {
        let err = ApiError::from_response(401, "Unauthorized", r#"{"error":"Unauthorized"}"#);
        assert_eq!(err.to_string(), "Unauthorized");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn message_list_is_joined() {
        let err = ApiError::from_response(
            400,
            "Bad Request",
            r#"{"message":["title should not be empty","status must be valid"]}"#,
        );
        assert_eq!(
            err.to_string(),
            "title should not be empty, status must be valid"
        );
    }

    #[test]
    fn raw_text_then_status_text() {
        let err = ApiError::from_response(502, "Bad Gateway", "upstream down");
        assert_eq!(err.to_string(), "upstream down");

        let err = ApiError::from_response(500, "Internal Server Error", "");
        assert_eq!(err.to_string(), "Internal Server Error");

        let err = ApiError::from_response(500, "Internal Server Error", r#"{"statusCode":500}"#);
        assert_eq!(err.to_string(), r#"{"statusCode":500}"#);
    }

    #[test]
    fn validation_errors_are_combined() {
        let err = ApiError::from_response(
            422,
            "Unprocessable Entity",
            r#"{"message":"Validation failed","validationErrors":[
                {"property":"title","message":"Title is required"},
                {"property":"dueDate","message":"Invalid date"}
            ]}"#,
        );
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.status(), 422);
        assert_eq!(
            err.to_string(),
            "Validation failed: title: Title is required, dueDate: Invalid date"
        );
    }

    #[test]
    fn empty_validation_list_is_plain_http_error() {
        let err = ApiError::from_response(
            400,
            "Bad Request",
            r#"{"message":"Bad input","validationErrors":[]}"#,
        );
        assert_eq!(err.kind(), ApiErrorKind::Http);
        assert_eq!(err.to_string(), "Bad input");
    }

    #[test]
    fn sentinel_errors() {
        let err = ApiError::network();
        assert_eq!(err.status(), 0);
        assert_eq!(err.status_text(), "Network Error");
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);

        let err = ApiError::unknown("boom");
        assert_eq!(err.status(), 0);
        assert_eq!(err.status_text(), "Unknown Error");
    }
}
