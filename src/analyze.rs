//! Top-level analysis entry point.
//!
//! One strictly linear pass per document: validate → encode → one completions
//! call → typed parse → cost accounting. There is no retry and no fan-out;
//! a failure at any stage fails the whole analysis with a typed
//! [`AnalysisError`].

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::pipeline::{encode, input, llm};
use crate::pricing::Costing;
use crate::report::{parse_report, StatementReport};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// The result of analysing one document: the typed report plus the cost of
/// producing it.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub report: StatementReport,
    pub costing: Costing,
}

/// Analyse the PDF at `path` with the configured model.
///
/// # Arguments
/// * `path` — local path to a readable PDF (typically a fresh upload)
/// * `config` — validated analysis configuration
/// * `http` — shared reqwest client; the per-call timeout comes from `config`
///
/// # Errors
/// Any stage failure surfaces as a typed [`AnalysisError`]: input validation,
/// the upstream call, reply parsing, or a missing pricing entry.
pub async fn analyze(
    path: impl AsRef<Path>,
    config: &AnalysisConfig,
    http: &reqwest::Client,
) -> Result<AnalysisOutput, AnalysisError> {
    let path = path.as_ref();
    let start = Instant::now();
    info!("Starting analysis: {}", path.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    input::validate_pdf(path)?;

    // ── Step 2: Encode ───────────────────────────────────────────────────
    let payload = encode::encode_pdf(path).await?;

    // ── Step 3: Completions call ─────────────────────────────────────────
    let (content, usage) = llm::request_analysis(http, config, payload).await?;
    debug!("Model replied with {} bytes of content", content.len());

    // ── Step 4: Typed parse ──────────────────────────────────────────────
    let report = parse_report(&content)?;

    // ── Step 5: Cost accounting ──────────────────────────────────────────
    let pricing = config
        .pricing
        .get(&config.model)
        .ok_or_else(|| AnalysisError::UnpricedModel {
            model: config.model.clone(),
        })?;
    let costing = Costing::compute(&config.model, pricing, usage);

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        is_bank_statement = report.is_bank_statement,
        transactions = report.transactions.len(),
        total_tokens = costing.usage.total_tokens,
        "Analysis finished"
    );

    Ok(AnalysisOutput { report, costing })
}
