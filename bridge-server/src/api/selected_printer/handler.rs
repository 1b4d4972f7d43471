//! Selected Printer API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::resolver;
use crate::utils::AppResult;

/// Current pinned selection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPrinterResponse {
    pub selected_printer: Option<String>,
}

/// Selection update request; `null` (or an absent field) clears the pin
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionUpdate {
    #[serde(default)]
    pub printer_name: Option<String>,
}

/// Selection update response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionUpdateResponse {
    pub success: bool,
    pub selected_printer: Option<String>,
}

/// GET /api/selected-printer - the persisted pin, if any
pub async fn get_selected(
    State(state): State<ServerState>,
) -> AppResult<Json<SelectedPrinterResponse>> {
    Ok(Json(SelectedPrinterResponse {
        selected_printer: state.store.selected(),
    }))
}

/// POST /api/selected-printer - validate against the live directory and persist
pub async fn update_selected(
    State(state): State<ServerState>,
    Json(update): Json<SelectionUpdate>,
) -> AppResult<Json<SelectionUpdateResponse>> {
    let selected = resolver::update_selection(
        &state.store,
        &state.directory,
        update.printer_name.as_deref(),
    )?;

    tracing::info!(selected = ?selected, "Printer selection updated");

    Ok(Json(SelectionUpdateResponse {
        success: true,
        selected_printer: selected,
    }))
}
