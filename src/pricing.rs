//! Token pricing and cost accounting for a single completion call.
//!
//! Pricing is a plain lookup: model identifier → price per 1 000 prompt and
//! completion tokens. The table travels inside [`crate::AnalysisConfig`]
//! rather than living as a module-level global, so tests and alternative
//! deployments can supply their own rates without touching process state.
//!
//! The arithmetic is deliberately pure — no clock, no I/O — so the exact
//! figures the API returns can be unit-tested to the sixth decimal.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price per 1 000 tokens for one model, split by direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// USD per 1 000 prompt (input) tokens.
    pub prompt_per_1k: f64,
    /// USD per 1 000 completion (output) tokens.
    pub completion_per_1k: f64,
}

/// Read-only mapping of model identifier → [`ModelPricing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTable {
    models: HashMap<String, ModelPricing>,
}

impl Default for PricingTable {
    /// Rates for the two supported Gemini models (USD, per 1k tokens).
    fn default() -> Self {
        let mut models = HashMap::new();
        models.insert(
            "gemini-2.5-flash".to_string(),
            ModelPricing {
                prompt_per_1k: 0.0003,
                completion_per_1k: 0.0025,
            },
        );
        models.insert(
            "gemini-2.5-flash-lite".to_string(),
            ModelPricing {
                prompt_per_1k: 0.0001,
                completion_per_1k: 0.0004,
            },
        );
        Self { models }
    }
}

impl PricingTable {
    /// An empty table, for callers that want full control over entries.
    pub fn empty() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Look up the pricing for a model identifier.
    pub fn get(&self, model: &str) -> Option<ModelPricing> {
        self.models.get(model).copied()
    }

    /// Whether the table carries an entry for `model`.
    pub fn contains(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }

    /// Add or replace the pricing for a model identifier.
    pub fn insert(&mut self, model: impl Into<String>, pricing: ModelPricing) {
        self.models.insert(model.into(), pricing);
    }
}

/// Token counters as reported by the upstream API.
///
/// `total_tokens` is passed through verbatim, never recomputed locally — the
/// provider's counter is authoritative for billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Monetary cost breakdown for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    /// Always `"USD"` — the pricing table is denominated in dollars.
    pub currency: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

/// Usage plus cost plus the model that incurred it; attached to every
/// positive analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Costing {
    pub usage: Usage,
    pub cost: Cost,
    pub model: String,
}

impl Costing {
    /// Compute the cost record for one call.
    ///
    /// `input = prompt_tokens/1000 × prompt_per_1k`,
    /// `output = completion_tokens/1000 × completion_per_1k`,
    /// each figure rounded to 6 decimal places.
    pub fn compute(model: impl Into<String>, pricing: ModelPricing, usage: Usage) -> Self {
        let input_cost = usage.prompt_tokens as f64 / 1000.0 * pricing.prompt_per_1k;
        let output_cost = usage.completion_tokens as f64 / 1000.0 * pricing.completion_per_1k;
        let total_cost = input_cost + output_cost;

        Self {
            usage,
            cost: Cost {
                currency: "USD".to_string(),
                input_cost: round6(input_cost),
                output_cost: round6(output_cost),
                total_cost: round6(total_cost),
            },
            model: model.into(),
        }
    }
}

/// Round to 6 decimal places, matching the precision of the published rates.
fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}
