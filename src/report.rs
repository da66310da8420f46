//! Typed representation of the model's analysis reply.
//!
//! The prompt instructs the model to answer with one JSON object in a fixed
//! schema. Rather than trusting field presence at each access site, the reply
//! is validated once into [`StatementReport`]; downstream code then works
//! with plain Rust types. Two failure modes are distinguished:
//!
//! * the text is not JSON at all → [`AnalysisError::MalformedReply`];
//! * the text is JSON but not an object fitting the schema →
//!   [`AnalysisError::SchemaMismatch`].
//!
//! Every schema field is optional on the wire (`#[serde(default)]`): the
//! prompt says "use null for missing information", and a partially filled
//! object must map to `None`s rather than a parse failure. Extra fields the
//! model invents are ignored.
//!
//! [`AnalysisError::MalformedReply`]: crate::error::AnalysisError::MalformedReply
//! [`AnalysisError::SchemaMismatch`]: crate::error::AnalysisError::SchemaMismatch

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// The statement period as reported by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPeriod {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// One transaction row extracted from the statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub debit: Option<f64>,
    #[serde(default)]
    pub credit: Option<f64>,
    #[serde(default)]
    pub balance: Option<f64>,
}

/// The model's full analysis of one document.
///
/// When `is_bank_statement` is false the prompt contract says
/// `transactions` is empty and `analysis` is null; the HTTP layer collapses
/// that case to a short negative response and never exposes the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementReport {
    #[serde(default)]
    pub is_bank_statement: bool,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(rename = "CIF_ID", default)]
    pub cif_id: Option<String>,
    #[serde(rename = "IFSC", default)]
    pub ifsc: Option<String>,
    #[serde(default)]
    pub statement_period: Option<StatementPeriod>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub analysis: Option<String>,
}

/// Parse the model's text content into a [`StatementReport`].
///
/// Validation happens in two steps so the two failure modes stay
/// distinguishable: JSON syntax first, object shape second.
pub fn parse_report(content: &str) -> Result<StatementReport, AnalysisError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| AnalysisError::MalformedReply {
            detail: e.to_string(),
        })?;

    if !value.is_object() {
        return Err(AnalysisError::SchemaMismatch {
            detail: format!("expected a JSON object, got {}", json_kind(&value)),
        });
    }

    serde_json::from_value(value).map_err(|e| AnalysisError::SchemaMismatch {
        detail: e.to_string(),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
