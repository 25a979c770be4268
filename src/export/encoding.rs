//! Transport encoding of binary attachments
//!
//! Attachments travel inside the JSON body of the send call as
//! `data:<mime>;base64,<payload>` URLs.

use crate::error::{ComplaintError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const PDF_MIME: &str = "application/pdf";

/// Encodes `bytes` as a data URL on the blocking pool.
///
/// This is the only await point before the send call; a failed worker is
/// reported as [`ComplaintError::Encoding`].
pub async fn encode_data_url(bytes: Vec<u8>, mime: &str) -> Result<String> {
    let mime = mime.to_string();
    let size = bytes.len();

    let encoded = tokio::task::spawn_blocking(move || to_data_url(&bytes, &mime))
        .await
        .map_err(|e| ComplaintError::Encoding(e.to_string()))?;

    tracing::debug!(bytes = size, encoded = encoded.len(), "attachment encoded");
    Ok(encoded)
}

pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Splits a data URL into its MIME type and base64 payload
pub fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    Some((mime, payload))
}
