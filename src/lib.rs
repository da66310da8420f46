//! # bankstat
//!
//! Analyse uploaded bank statements with a Large Language Model.
//!
//! ## Why this crate?
//!
//! Rule-based statement parsers break on every new bank layout — column
//! orders, date formats, and transaction descriptions differ per institution.
//! Instead this crate hands the whole PDF to an LLM with a strict JSON
//! schema in the prompt, then validates the reply into typed Rust structures
//! and attaches token-based cost accounting for the call.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTTP upload (multipart PDF)
//!  │
//!  ├─ 1. Persist  save the file under the upload directory
//!  ├─ 2. Input    validate existence, readability, %PDF magic
//!  ├─ 3. Encode   bytes → base64 data:application/pdf;… payload
//!  ├─ 4. LLM      one chat-completions call (temperature 0, JSON mode)
//!  ├─ 5. Parse    reply → typed StatementReport (or typed failure)
//!  └─ 6. Price    token usage × per-1k pricing table → Costing
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bankstat::{analyze, AnalysisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::builder()
//!         .api_key(std::env::var("GEMINI_API_KEY")?)
//!         .build()?;
//!     let http = reqwest::Client::new();
//!     let output = analyze("statement.pdf", &config, &http).await?;
//!     println!("bank statement: {}", output.report.is_bank_statement);
//!     println!("cost: ${:.6}", output.costing.cost.total_cost);
//!     Ok(())
//! }
//! ```
//!
//! The HTTP surface lives in [`api`]: [`api::router`] builds the two-route
//! axum application served by the `bankstat` binary.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod pricing;
pub mod prompts;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, AnalysisOutput};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use error::AnalysisError;
pub use pricing::{Cost, Costing, ModelPricing, PricingTable, Usage};
pub use report::{StatementPeriod, StatementReport, Transaction};
