//! Operator page
//!
//! Embedded HTML page for choosing the pinned printer; a plain consumer of
//! the `/api/printers` and `/api/selected-printer` endpoints.

use axum::{Router, response::Html, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/ui", get(page))
}

/// GET /ui
async fn page() -> Html<&'static str> {
    Html(include_str!("page.html"))
}
