//! Combined router for all optout endpoints

use axum::{Router, body::Body};
use http::Request;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create a combined router for all optout endpoints
///
/// Mount it under [`OPTOUT_ROUTE_PREFIX`](crate::OPTOUT_ROUTE_PREFIX). The endpoints will be available at:
/// - {OPTOUT_ROUTE_PREFIX}/unsubscribe (GET, POST)
/// - {OPTOUT_ROUTE_PREFIX}/preferences (GET, PUT)
pub fn optout_router() -> Router {
    optout_router_no_trace().layer(
        TraceLayer::new_for_http()
            // Path only: footer links carry the token in the query string
            .make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            })
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `optout_router()` but without the HTTP tracing middleware
pub fn optout_router_no_trace() -> Router {
    Router::new()
        .merge(super::unsubscribe::router())
        .merge(super::preferences::router())
}
