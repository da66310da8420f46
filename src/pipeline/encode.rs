//! File encoding: PDF bytes → base64 data-URI payload.
//!
//! The completions API accepts file attachments as base64 data URIs embedded
//! in the JSON request body. The whole document is read into memory — a bank
//! statement is a few megabytes at worst, and the API needs the complete
//! payload in one request anyway.

use crate::error::AnalysisError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// Read `path` and encode it as a `data:application/pdf;base64,…` payload.
pub async fn encode_pdf(path: &Path) -> Result<String, AnalysisError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AnalysisError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(encode_pdf_bytes(&bytes))
}

/// Encode in-memory PDF bytes as a data-URI payload.
pub fn encode_pdf_bytes(bytes: &[u8]) -> String {
    let b64 = STANDARD.encode(bytes);
    debug!("Encoded PDF → {} bytes base64", b64.len());
    format!("data:application/pdf;base64,{b64}")
}
