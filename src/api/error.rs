//! HTTP error translation.
//!
//! Every handler failure becomes an [`ApiError`]: a status code plus a
//! user-safe detail string, serialised as `{"detail": …}`. Two mappings are
//! contractual and must stay byte-exact:
//!
//! * missing upload → 400 `"No file uploaded"`;
//! * model reply that is JSON but not a statement object → 500
//!   `"Invalid model response"`.
//!
//! Upstream transport failures and non-JSON replies map to 502 rather than
//! an unhandled 500 — the failure is the collaborator's, not ours, and the
//! client deserves a body saying so.

use crate::error::AnalysisError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// A handler failure with its HTTP representation.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            detail: detail.into(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match &err {
            AnalysisError::NotAPdf { .. } => {
                warn!("Rejected upload: {err}");
                Self::bad_request("Uploaded file is not a PDF")
            }
            AnalysisError::FileNotFound { .. }
            | AnalysisError::PermissionDenied { .. }
            | AnalysisError::Io { .. } => {
                error!("Upload file handling failed: {err}");
                Self::internal("Failed to read uploaded file")
            }
            AnalysisError::Upstream { .. }
            | AnalysisError::UpstreamStatus { .. }
            | AnalysisError::EmptyReply => {
                error!("Completions API failure: {err}");
                Self::bad_gateway("Model API call failed")
            }
            AnalysisError::MalformedReply { .. } => {
                error!("Model reply unusable: {err}");
                Self::bad_gateway("Model reply was not valid JSON")
            }
            AnalysisError::SchemaMismatch { .. } => {
                error!("Model reply off-schema: {err}");
                Self::internal("Invalid model response")
            }
            AnalysisError::UnpricedModel { .. } | AnalysisError::InvalidConfig(_) => {
                error!("Service misconfiguration: {err}");
                Self::internal("Invalid service configuration")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
