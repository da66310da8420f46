//! Error types for the bankstat library.
//!
//! A single [`AnalysisError`] enum covers the whole pipeline. The variants
//! deliberately mirror the failure taxonomy of the analysis pass:
//!
//! * input errors — the saved upload is missing, unreadable, or not a PDF;
//! * upstream errors — the completions API could not be reached or answered
//!   with a non-success status;
//! * reply errors — the model's text was not JSON ([`MalformedReply`]) or was
//!   JSON that does not fit the statement schema ([`SchemaMismatch`]);
//! * configuration errors — the active model has no pricing entry, or the
//!   builder was given invalid values.
//!
//! The HTTP layer maps these onto status codes in [`crate::api::error`];
//! nothing in this module knows about HTTP.
//!
//! [`MalformedReply`]: AnalysisError::MalformedReply
//! [`SchemaMismatch`]: AnalysisError::SchemaMismatch

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// Reading or writing a file failed for some other reason.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Upstream errors ───────────────────────────────────────────────────
    /// The completions API could not be reached (DNS, TLS, timeout, …).
    #[error("Failed to call completions API: {reason}\nCheck the API base URL and your network connection.")]
    Upstream { reason: String },

    /// The completions API answered with a non-success HTTP status.
    #[error("Completions API returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// The API reply carried no usable choice content.
    #[error("Completions API reply contained no message content")]
    EmptyReply,

    // ── Reply errors ──────────────────────────────────────────────────────
    /// The model's text reply was not valid JSON.
    #[error("Model reply is not valid JSON: {detail}")]
    MalformedReply { detail: String },

    /// The model's reply was JSON but not a statement-report object.
    #[error("Model reply does not match the statement schema: {detail}")]
    SchemaMismatch { detail: String },

    // ── Configuration errors ──────────────────────────────────────────────
    /// The active model identifier has no entry in the pricing table.
    #[error("Model '{model}' has no pricing entry.\nAdd it to the pricing table or switch to a priced model.")]
    UnpricedModel { model: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
