//! Raw-print dispatch orchestration
//!
//! Per request: resolve the target, stage the bytes, push them through the
//! configured device channel. The staging temp file is removed on every
//! exit path, success and failure alike. A bounded timeout caps each
//! dispatch so a hung device cannot pin a request forever.

use std::io::Write;
use std::time::Duration;

use bridge_printer::{SpoolerPrinter, sanitize_receipt_text};
use serde::Serialize;
use tracing::{info, instrument};

use crate::core::{DeviceChannel, ServerState};
use crate::resolver;
use crate::utils::AppError;

/// Outcome of a dispatched job
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub printer: String,
    pub bytes: usize,
    pub job_id: Option<u32>,
}

/// Send decoded payload bytes through the configured device channel
#[instrument(skip(state, payload), fields(bytes = payload.len()))]
pub async fn dispatch(state: &ServerState, payload: Vec<u8>) -> Result<DispatchReport, AppError> {
    let timeout = Duration::from_millis(state.config.dispatch_timeout_ms);
    let bytes = payload.len();

    match &state.device {
        DeviceChannel::Spooler => {
            let target = resolver::resolve_target(&state.store, &state.directory)?;

            // Scoped staging artifact; dropped (deleted) on every exit path
            let mut staged = tempfile::Builder::new()
                .prefix("receipt-")
                .suffix(".bin")
                .tempfile_in(&state.config.work_dir)
                .map_err(|e| AppError::internal(format!("Failed to stage print job: {}", e)))?;
            staged
                .write_all(&payload)
                .and_then(|_| staged.flush())
                .map_err(|e| AppError::internal(format!("Failed to stage print job: {}", e)))?;

            let printer = SpoolerPrinter::new(&target);
            let job = tokio::time::timeout(timeout, printer.print_file(staged.path()))
                .await
                .map_err(|_| {
                    AppError::internal(format!("Dispatch to {} timed out", target))
                })??;

            info!(printer = %target, bytes, job_id = job.job_id, "Print job spooled");
            Ok(DispatchReport {
                printer: target,
                bytes,
                job_id: Some(job.job_id),
            })
        }
        DeviceChannel::Stream {
            label,
            printer,
            fold_ascii,
        } => {
            // Legacy serial firmware cannot render multi-byte encodings;
            // network devices take the payload verbatim
            let data = if *fold_ascii {
                sanitize_receipt_text(&payload)
            } else {
                payload
            };

            tokio::time::timeout(timeout, printer.print(&data))
                .await
                .map_err(|_| AppError::internal(format!("Dispatch to {} timed out", label)))??;

            info!(device = %label, bytes, "Print job written to stream device");
            Ok(DispatchReport {
                printer: label.clone(),
                bytes,
                job_id: None,
            })
        }
    }
}
