use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::get,
};
use http::StatusCode;
use serde_json::Value;

use optout::{PreferenceRecord, get_preferences_core, update_preferences_core};

use crate::error::{ErrorResponse, IntoResponseError, error_response};
use crate::session::AuthUser;

/// Create a router for the authenticated preference endpoints
pub(super) fn router() -> Router<()> {
    Router::new().route(
        "/preferences",
        get(get_preferences_handler).put(put_preferences_handler),
    )
}

/// Current flags of the authenticated user, created with defaults if absent
async fn get_preferences_handler(
    auth_user: AuthUser,
) -> Result<Json<PreferenceRecord>, ErrorResponse> {
    let record = get_preferences_core(&auth_user.id)
        .await
        .into_response_error()?;
    Ok(Json(record))
}

/// Replace all four flags of the authenticated user
async fn put_preferences_handler(
    auth_user: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PreferenceRecord>, ErrorResponse> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Unreadable preference body: {}", e.body_text());
        error_response(StatusCode::BAD_REQUEST, "Invalid preferences payload")
    })?;

    let record = update_preferences_core(&auth_user.id, payload)
        .await
        .into_response_error()?;
    Ok(Json(record))
}
