use axum::{
    Json,
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};
use http::{StatusCode, request::Parts};
use serde_json::json;

use super::config::OPTOUT_IDENTITY_HEADER;

/// Rejection for requests without a trusted identity
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response()
    }
}

/// Authenticated user, available as an Axum extractor
///
/// The session itself is owned by an upstream layer (reverse proxy or auth
/// middleware) that verifies the caller and forwards the user ID in
/// [`OPTOUT_IDENTITY_HEADER`]. That header must never be accepted from the
/// public internet directly.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use optout_axum::AuthUser;
///
/// async fn whoami(user: AuthUser) -> String {
///     user.id
/// }
///
/// let app: Router = Router::new().route("/whoami", get(whoami));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    /// Unique user identifier
    pub id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(OPTOUT_IDENTITY_HEADER.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                tracing::debug!(
                    "Missing identity header {}",
                    OPTOUT_IDENTITY_HEADER.as_str()
                );
                AuthRejection
            })?;

        Ok(AuthUser { id: id.to_string() })
    }
}
