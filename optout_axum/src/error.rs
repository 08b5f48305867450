use axum::Json;
use http::StatusCode;
use serde_json::{Value, json};

use optout::{PreferenceSyncError, UnsubscribeError};

/// Error half of every handler result: a status and `{"error": message}`
pub(crate) type ErrorResponse = (StatusCode, Json<Value>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(json!({ "error": message.into() })))
}

/// Helper trait for converting errors to a standard response error format
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ErrorResponse>;
}

/// Only the `Display` text reaches the client; details stay in the logs
impl<T> IntoResponseError<T> for Result<T, UnsubscribeError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            let status = match e {
                UnsubscribeError::MissingToken => StatusCode::BAD_REQUEST,
                UnsubscribeError::InvalidToken => StatusCode::BAD_REQUEST,
                UnsubscribeError::UserNotFound => StatusCode::NOT_FOUND,
                UnsubscribeError::TransientStoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
                UnsubscribeError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, PreferenceSyncError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            let status = match e {
                PreferenceSyncError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
                PreferenceSyncError::UserNotFound => StatusCode::NOT_FOUND,
                PreferenceSyncError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.to_string())
        })
    }
}
