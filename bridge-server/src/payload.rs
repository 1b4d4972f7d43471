//! Inbound payload decoding
//!
//! The ERP sends receipt bytes as standard base64, optionally wrapped in a
//! data URI. Decoding is strict: malformed base64 is rejected instead of
//! best-effort decoded, so a truncated payload never reaches the printer
//! as garbage.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Payload decoding error
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Decode a base64 print payload into raw bytes
///
/// Accepts an optional `data:<mediatype>;base64,` prefix (marker match is
/// case-insensitive).
pub fn decode_payload(data: &str) -> Result<Vec<u8>, PayloadError> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Err(PayloadError::InvalidPayload(
            "expected a base64 string".to_string(),
        ));
    }

    let b64 = strip_data_uri(trimmed);
    STANDARD
        .decode(b64)
        .map_err(|e| PayloadError::InvalidPayload(format!("malformed base64: {}", e)))
}

/// Strip a `data:<mediatype>;base64,` prefix if present
fn strip_data_uri(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix("data:")
        && let Some((header, body)) = rest.split_once(',')
        && header.to_ascii_lowercase().ends_with(";base64")
    {
        return body;
    }
    s
}
