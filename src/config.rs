//! Configuration for the analysis pipeline.
//!
//! Everything the pipeline needs — model identifier, sampling settings, API
//! endpoint and credential, upload directory, pricing table — lives in one
//! [`AnalysisConfig`] value built at startup and passed explicitly. Nothing
//! in the crate reads ambient process globals at request time, which keeps
//! requests reproducible and lets tests run several differently-configured
//! pipelines in one process.
//!
//! # Design choice: builder over constructor
//! Callers usually only care about the API key and perhaps the model; the
//! builder lets them set just those and inherit documented defaults for the
//! rest, while `build()` rejects inconsistent combinations (empty credential,
//! a model absent from the pricing table) before the first request.

use crate::error::AnalysisError;
use crate::pricing::PricingTable;
use std::fmt;
use std::path::PathBuf;

/// Default model identifier; must always have a pricing-table entry.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default OpenAI-compatible endpoint for the Gemini API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Configuration for bank statement analysis.
///
/// Built via [`AnalysisConfig::builder()`].
///
/// # Example
/// ```rust
/// use bankstat::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .api_key("sk-…")
///     .model("gemini-2.5-flash")
///     .upload_dir("uploads")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Model identifier sent to the completions API. Default: [`DEFAULT_MODEL`].
    ///
    /// Must be a key of [`AnalysisConfig::pricing`] — cost accounting is part
    /// of every response, so an unpriced model is a configuration error, not
    /// a runtime surprise.
    pub model: String,

    /// Sampling temperature. Default: 0.0.
    ///
    /// Zero keeps extraction deterministic: the same statement should yield
    /// the same fields and figures on every upload.
    pub temperature: f32,

    /// Maximum tokens the model may generate, if capped. Default: None.
    pub max_tokens: Option<u32>,

    /// Base URL of the OpenAI-compatible completions API (no trailing
    /// `/chat/completions`). Default: [`DEFAULT_API_BASE_URL`].
    pub api_base_url: String,

    /// Bearer credential for the completions API. Required.
    pub api_key: String,

    /// Per-call timeout in seconds. Default: 120.
    ///
    /// Statement PDFs routinely run to dozens of pages; the model reads the
    /// whole document in one call, so the ceiling is generous. The timeout
    /// bounds the request rather than letting a stuck upstream hold the
    /// connection open indefinitely.
    pub api_timeout_secs: u64,

    /// Directory uploaded files are persisted into (created if absent).
    /// Default: `uploads`.
    pub upload_dir: PathBuf,

    /// Model pricing used for cost accounting. Default: [`PricingTable::default()`].
    pub pricing: PricingTable,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            api_timeout_secs: 120,
            upload_dir: PathBuf::from("uploads"),
            pricing: PricingTable::default(),
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"<redacted>")
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn pricing(mut self, table: PricingTable) -> Self {
        self.config.pricing = table;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, AnalysisError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "API key must not be empty (set GEMINI_API_KEY)".into(),
            ));
        }
        if c.api_base_url.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "API base URL must not be empty".into(),
            ));
        }
        if !c.pricing.contains(&c.model) {
            return Err(AnalysisError::InvalidConfig(format!(
                "model '{}' has no pricing entry",
                c.model
            )));
        }
        Ok(self.config)
    }
}
