//! Printers API module
//!
//! Live printer directory listing for the operator page.

mod handler;

pub use handler::PrintersResponse;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/printers", get(handler::list))
}
