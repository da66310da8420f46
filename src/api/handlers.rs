//! Route handlers and response shaping.
//!
//! The upload handler owns everything HTTP-facing: multipart intake,
//! persisting the file, translating pipeline errors, and collapsing the
//! typed [`AnalysisOutput`] into one of the two response shapes — a short
//! negative body for non-statements, or the full report with `bank_details`,
//! `transactions`, `analysis`, and `costing`.

use crate::analyze::{analyze, AnalysisOutput};
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::pipeline::input;
use crate::pricing::Costing;
use crate::report::{StatementPeriod, Transaction};
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::info;

/// `GET /` — liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "bankstat service is running" }))
}

// ── Response shapes ──────────────────────────────────────────────────────

/// The five statement header fields, nulls preserved on the wire.
#[derive(Debug, Serialize)]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    #[serde(rename = "CIF_ID")]
    pub cif_id: Option<String>,
    #[serde(rename = "IFSC")]
    pub ifsc: Option<String>,
    pub statement_period: Option<StatementPeriod>,
}

/// Body of a successful `POST /bank-statement-analysis`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    /// The model classified the document as something other than a bank
    /// statement; all extracted detail is withheld.
    NotAStatement {
        is_bank_statement: bool,
        message: &'static str,
    },
    /// Full report for a recognised statement.
    Statement {
        is_bank_statement: bool,
        bank_details: BankDetails,
        transactions: Vec<Transaction>,
        analysis: Option<String>,
        costing: Costing,
    },
}

/// Collapse an [`AnalysisOutput`] into the wire shape.
pub fn shape_response(output: AnalysisOutput) -> AnalysisResponse {
    let report = output.report;
    if !report.is_bank_statement {
        return AnalysisResponse::NotAStatement {
            is_bank_statement: false,
            message: "Given file is not a bank statement",
        };
    }

    AnalysisResponse::Statement {
        is_bank_statement: true,
        bank_details: BankDetails {
            bank_name: report.bank_name,
            account_name: report.account_name,
            cif_id: report.cif_id,
            ifsc: report.ifsc,
            statement_period: report.statement_period,
        },
        transactions: report.transactions,
        analysis: report.analysis,
        costing: output.costing,
    }
}

// ── Upload handler ───────────────────────────────────────────────────────

/// `POST /bank-statement-analysis` — accept one PDF, persist it, analyse it.
pub async fn analyze_statement(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let (filename, bytes) = read_upload(multipart).await?;

    // Reject non-PDFs before burning an API call on them.
    if !input::looks_like_pdf(&bytes) {
        return Err(ApiError::bad_request("Uploaded file is not a PDF"));
    }

    let path = save_upload(&state.config.upload_dir, &filename, &bytes).await?;
    info!(
        filename = %filename,
        size = bytes.len(),
        "Upload saved to {}",
        path.display()
    );

    let output = analyze(&path, &state.config, &state.http).await?;
    Ok(Json(shape_response(output)))
}

/// Pull the first file-carrying field out of the multipart body.
///
/// A field without a filename is not "the file" — the contract requires a
/// named upload, and an absent or empty name is a 400 `"No file uploaded"`.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request(format!("Failed to parse multipart data: {e}"))
    })? {
        let Some(filename) = sanitized_filename(field.file_name()) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;

        return Ok((filename, bytes.to_vec()));
    }

    Err(ApiError::bad_request("No file uploaded"))
}

/// Strip any directory components from a client-supplied filename.
///
/// Uploads are keyed by the name the client sends; without this a name like
/// `../../etc/cron.d/x` would escape the upload directory.
fn sanitized_filename(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let name = Path::new(raw)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name)
}

/// Persist the upload verbatim, creating the directory on first use.
/// Same-name uploads overwrite: last write wins, no locking.
async fn save_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        ApiError::internal(format!("Failed to create upload directory: {e}"))
    })?;

    let path = dir.join(filename);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to save uploaded file: {e}")))?;

    Ok(path)
}
