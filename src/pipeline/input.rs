//! Input validation: check the saved upload before spending an API call.
//!
//! The completions call is the expensive step of the pipeline, so obviously
//! broken inputs are rejected up front: a missing or unreadable file, or one
//! whose first bytes are not the `%PDF` magic. The magic check catches the
//! common case of a client uploading a text or image file under a `.pdf`
//! name — the model would happily hallucinate an answer for it.

use crate::error::AnalysisError;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Validate that `path` points at a readable PDF file.
///
/// Checks existence, read permission, and the `%PDF` magic bytes. Returns
/// `Ok(())` when the file is safe to hand to the encoder.
pub fn validate_pdf(path: &Path) -> Result<(), AnalysisError> {
    if !path.exists() {
        return Err(AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(AnalysisError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(AnalysisError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let mut magic = [0u8; 4];
    if file.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
        return Err(AnalysisError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    debug!("Validated PDF input: {}", path.display());
    Ok(())
}

/// Quick magic-byte check on an in-memory buffer, used by the upload handler
/// before the file ever touches disk.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && &bytes[..4] == b"%PDF"
}
