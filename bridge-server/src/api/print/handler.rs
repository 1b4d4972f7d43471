//! Print API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::dispatch::{self, DispatchReport};
use crate::payload::decode_payload;
use crate::utils::{AppError, AppResult};

/// Print submission request
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    /// Base64 payload, optionally with a data-URI prefix
    #[serde(default)]
    pub data: Option<String>,
}

/// Print submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintResponse {
    pub success: bool,
    /// Device that received the job
    pub printer: String,
    /// Decoded payload size
    pub bytes: usize,
    /// Spooler job id; absent for direct-stream devices
    pub job_id: Option<u32>,
}

/// POST /print - decode the payload and dispatch it to the resolved device
pub async fn print(
    State(state): State<ServerState>,
    Json(req): Json<PrintRequest>,
) -> AppResult<Json<PrintResponse>> {
    let data = req
        .data
        .as_deref()
        .ok_or_else(|| AppError::validation("No data provided"))?;

    let payload = decode_payload(data)?;

    let DispatchReport {
        printer,
        bytes,
        job_id,
    } = dispatch::dispatch(&state, payload).await?;

    Ok(Json(PrintResponse {
        success: true,
        printer,
        bytes,
        job_id,
    }))
}
