//! LK Printers storefront library.
//!
//! Everything the storefront binary serves, exposed as a library so the
//! router can be driven directly from tests and the CLI can share the data
//! loaders.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for cart interactions
//! - Askama templates for server-side rendering
//! - Catalog and site tables loaded from JSON at startup
//! - Carts kept in the session (in-memory store, signed cookie)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod filters;
pub mod htmx;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{
    SessionLayerError, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Build the full application router with every middleware layer.
///
/// # Errors
///
/// Returns an error if the session layer cannot be built from the configured
/// secret.
pub fn app(state: AppState) -> Result<Router, SessionLayerError> {
    let session_layer = create_session_layer(state.config())?;
    let static_dir = state.config().static_dir.clone();

    Ok(Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction()))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Request span with an empty `request_id` field for the request ID
/// middleware to fill in.
fn make_request_span(request: &axum::http::Request<axum::body::Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
