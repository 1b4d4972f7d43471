//! HTTP API routes
//!
//! # Structure
//!
//! - [`print`] - raw print submission
//! - [`printers`] - printer directory listing
//! - [`selected_printer`] - pinned printer read/update
//! - [`health`] - health check
//! - [`ui`] - embedded operator page

pub mod health;
pub mod print;
pub mod printers;
pub mod selected_printer;
pub mod ui;

use axum::{Router, middleware};
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// CORS layer for the configured ERP origin; permissive when unset or "*"
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin {
        Some(origin) if origin != "*" => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!(origin, "Invalid CORS origin, falling back to permissive");
                CorsLayer::permissive()
            }
        },
        _ => CorsLayer::permissive(),
    }
}

/// Build the router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(print::router())
        .merge(printers::router())
        .merge(selected_printer::router())
        .merge(health::router())
        .merge(ui::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    build_router()
        .with_state(state)
        // Tower HTTP middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Request logging - outermost, executed first
        .layer(middleware::from_fn(log_request))
}
