//! Health check route
//!
//! | Path | Method | Description | Auth |
//! |---------|--------|------------------------|------|
//! | /health | GET | Simple health check | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::{DeviceChannel, ServerState};

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | error)
    status: &'static str,
    /// Version number
    version: &'static str,
    /// Active delivery strategy (spooler | stream)
    mode: &'static str,
    /// Stream device label, when one is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<String>,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let (mode, device) = match &state.device {
        DeviceChannel::Spooler => ("spooler", None),
        DeviceChannel::Stream { label, .. } => ("stream", Some(label.clone())),
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode,
        device,
    })
}
