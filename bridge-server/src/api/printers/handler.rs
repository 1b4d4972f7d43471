//! Printers API handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Directory listing response
#[derive(Debug, Serialize)]
pub struct PrintersResponse {
    /// Installed printer names, source order, duplicates removed
    pub printers: Vec<String>,
    /// OS default printer, if one is configured
    pub default: Option<String>,
}

/// GET /api/printers - fresh directory query, never cached
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<PrintersResponse>> {
    let listing = state.directory.list()?;

    let default = listing
        .iter()
        .find(|p| p.is_default)
        .map(|p| p.name.clone());
    let printers = listing.into_iter().map(|p| p.name).collect();

    Ok(Json(PrintersResponse { printers, default }))
}
