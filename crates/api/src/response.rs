//! Response envelopes shared by the routes.
//!
//! Every body carries a `messages` list of `{level, message}` entries that a
//! client can show as notices.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use puc_shared::AppError;
use serde::Serialize;
use serde_json::json;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// The action went through.
    Success,
    /// Neutral notice.
    Info,
    /// The action failed.
    Danger,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// Text to show.
    pub message: String,
}

impl Message {
    /// Creates a success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            message: message.into(),
        }
    }

    /// Creates an error message.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Danger,
            message: message.into(),
        }
    }
}

fn status_of(error: &AppError) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Builds the JSON error response for an application error.
///
/// Server-side detail is never included; callers log it before calling.
pub fn error_response(error: &AppError) -> Response {
    let message = error.public_message();
    (
        status_of(error),
        Json(json!({
            "error": error.error_code(),
            "message": message,
            "messages": [Message::danger(message.clone())],
        })),
    )
        .into_response()
}

/// Builds a validation failure that lists each problem and echoes the
/// submitted input back.
pub fn validation_response<T: Serialize>(messages: &[String], submitted: &T) -> Response {
    let error = AppError::Validation(messages.join(" "));
    let messages: Vec<Message> = messages.iter().map(Message::danger).collect();
    (
        status_of(&error),
        Json(json!({
            "error": error.error_code(),
            "messages": messages,
            "submitted": submitted,
        })),
    )
        .into_response()
}
