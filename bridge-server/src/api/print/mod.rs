//! Print API module
//!
//! Raw print submission from the ERP.

mod handler;

pub use handler::{PrintRequest, PrintResponse};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/print", post(handler::print))
}
