//! Unified error handling at the HTTP boundary
//!
//! Component errors ([`PrintError`], [`StoreError`], [`PayloadError`],
//! [`ResolveError`]) are mapped here to a generic client-facing response.
//! The typed cause and underlying OS error text are logged server-side and
//! never returned to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bridge_printer::PrintError;
use serde::Serialize;
use tracing::error;

use crate::payload::PayloadError;
use crate::resolver::ResolveError;
use crate::store::StoreError;

/// Client-facing error body
///
/// ```json
/// { "error": "Print failed. Check the printer and its driver." }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error enumeration
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller input problem (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Environment or device problem (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Application-level Result type, used in HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                // Typed cause stays in the server log; the caller gets a
                // generic message with no device or OS detail
                error!(target: "dispatch", error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Print failed. Check the printer and its driver.".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ========== Conversions from component error types ==========

impl From<PayloadError> for AppError {
    fn from(e: PayloadError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<PrintError> for AppError {
    fn from(e: PrintError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::UnknownPrinter(name) => {
                AppError::Validation(format!("Printer not installed on this machine: {}", name))
            }
            ResolveError::EmptyName => AppError::Validation(
                "Printer name must be non-empty, or null to clear the selection".to_string(),
            ),
            ResolveError::Printer(inner) => inner.into(),
            ResolveError::Store(inner) => inner.into(),
        }
    }
}
