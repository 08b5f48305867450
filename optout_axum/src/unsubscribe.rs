use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{FromRequest, Query, Request, rejection::QueryRejection},
    response::Html,
    routing::get,
};
use http::{StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use optout::{Scope, unsubscribe_core, verify_unsubscribe_token};

use crate::error::{ErrorResponse, IntoResponseError, error_response};

/// Create a router for the unsubscribe endpoint
pub(super) fn router() -> Router<()> {
    Router::new().route("/unsubscribe", get(unsubscribe_get).post(unsubscribe_post))
}

/// Request parameters shared by the query string, JSON and form variants
#[derive(Deserialize, Default, Debug)]
pub(super) struct UnsubscribeParams {
    token: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_scope")]
    scope: Option<String>,
}

/// Accept any `type` value; non-strings are treated as absent
fn lenient_scope<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(scope) => Some(scope),
        _ => None,
    })
}

#[derive(Template)]
#[template(path = "unsubscribe_confirm.html")]
struct ConfirmTemplate<'a> {
    token: &'a str,
    scope: &'static str,
    description: &'static str,
}

fn describe(scope: Scope) -> &'static str {
    match scope {
        Scope::All => "all email notifications",
        Scope::Weekly => "the weekly digest",
        Scope::Alerts => "new skill alerts",
    }
}

/// Footer link: `GET /unsubscribe?token=...&type=...`
///
/// Link scanners fetch these URLs, so a GET only verifies the token and
/// renders a form that posts it back. Nothing is written here.
async fn unsubscribe_get(
    params: Result<Query<UnsubscribeParams>, QueryRejection>,
) -> Result<Html<String>, ErrorResponse> {
    let params = params.map(|Query(p)| p).unwrap_or_else(|e| {
        tracing::debug!("Unreadable unsubscribe query: {}", e);
        UnsubscribeParams::default()
    });

    verify_unsubscribe_token(params.token.as_deref()).into_response_error()?;

    let scope = Scope::from_request(params.scope.as_deref());
    let template = ConfirmTemplate {
        token: params.token.as_deref().map(str::trim).unwrap_or_default(),
        scope: scope.as_str(),
        description: describe(scope),
    };
    let html = template.render().map_err(|e| {
        tracing::error!("Failed to render unsubscribe page: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
    })?;

    Ok(Html(html))
}

/// JSON body, the confirmation form, or an RFC 8058 one-click form post
async fn unsubscribe_post(request: Request) -> Result<Json<Value>, ErrorResponse> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    let params = if is_form {
        Form::<UnsubscribeParams>::from_request(request, &())
            .await
            .map(|Form(p)| p)
            .map_err(|e| e.body_text())
    } else {
        Json::<UnsubscribeParams>::from_request(request, &())
            .await
            .map(|Json(p)| p)
            .map_err(|e| e.body_text())
    };

    // An unreadable body carries no usable token
    let params = params.unwrap_or_else(|e| {
        tracing::debug!("Unreadable unsubscribe body: {}", e);
        UnsubscribeParams::default()
    });
    handle(params).await
}

async fn handle(params: UnsubscribeParams) -> Result<Json<Value>, ErrorResponse> {
    unsubscribe_core(params.token.as_deref(), params.scope.as_deref())
        .await
        .into_response_error()?;

    Ok(Json(json!({ "success": true })))
}
