//! FurniCraft storefront library.
//!
//! The storefront is exposed as a library so the integration tests can
//! drive the same router the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the full application router: pages, health check, static files
/// and the session, request ID and tracing layers.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
