//! HTTP surface: a two-route axum application.
//!
//! * `GET /` — liveness/status JSON.
//! * `POST /bank-statement-analysis` — multipart upload of one PDF; persists
//!   it under the configured upload directory and runs the analysis pass.
//!
//! State is one [`AppState`] value: the validated configuration plus a shared
//! HTTP client for upstream calls. Both are cheap to clone per request.

pub mod error;
pub mod handlers;

use crate::config::AnalysisConfig;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Largest accepted upload body. Statement PDFs run a few MB; 25 MB leaves
/// headroom for scanned documents without letting arbitrary blobs through.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared per-request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnalysisConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Wrap a validated configuration with a fresh HTTP client.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

/// Build the two-route application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/bank-statement-analysis", post(handlers::analyze_statement))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
