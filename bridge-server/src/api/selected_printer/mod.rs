//! Selected Printer API module
//!
//! Read and update the pinned printer override.

mod handler;

pub use handler::{SelectedPrinterResponse, SelectionUpdate};

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/selected-printer",
        get(handler::get_selected).post(handler::update_selected),
    )
}
