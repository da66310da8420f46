//! Completions API interaction: wire types and the single model call.
//!
//! The client speaks the OpenAI-compatible chat-completions dialect, which
//! the Gemini API exposes alongside its native one. The request is built the
//! same way every time: one user message carrying the fixed analysis prompt
//! as a text part and the encoded PDF as a file part, `temperature` from the
//! config (0 by default), and a forced `json_object` response format so the
//! model cannot wrap its answer in prose.
//!
//! This module is intentionally thin — prompt text lives in
//! [`crate::prompts`], reply validation in [`crate::report`] — so the wire
//! shapes can be unit-tested without a live endpoint.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::pricing::Usage;
use crate::prompts::ANALYSIS_PROMPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

// ── Request types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub response_format: ResponseFormat,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: Vec<ContentPart>,
}

/// One part of a multi-part user message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    File { file: FileData },
}

#[derive(Debug, Serialize)]
pub struct FileData {
    /// `data:application/pdf;base64,…` payload.
    pub file_data: String,
}

// ── Response types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Call ─────────────────────────────────────────────────────────────────

/// Build the completions request for one encoded PDF.
pub fn build_request(config: &AnalysisConfig, pdf_payload: String) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        response_format: ResponseFormat {
            kind: "json_object",
        },
        messages: vec![Message {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: ANALYSIS_PROMPT.to_string(),
                },
                ContentPart::File {
                    file: FileData {
                        file_data: pdf_payload,
                    },
                },
            ],
        }],
    }
}

/// Issue the single completions call and return the reply text plus token
/// usage. No retries: the caller owns that policy, and today's policy is
/// "fail the request".
pub async fn request_analysis(
    http: &reqwest::Client,
    config: &AnalysisConfig,
    pdf_payload: String,
) -> Result<(String, Usage), AnalysisError> {
    let request = build_request(config, pdf_payload);

    let response = http
        .post(config.completions_url())
        .bearer_auth(&config.api_key)
        .timeout(Duration::from_secs(config.api_timeout_secs))
        .json(&request)
        .send()
        .await
        .map_err(|e| AnalysisError::Upstream {
            reason: if e.is_timeout() {
                format!("timed out after {}s", config.api_timeout_secs)
            } else {
                e.to_string()
            },
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnalysisError::UpstreamStatus {
            status: status.as_u16(),
            message: truncate(&body, 300),
        });
    }

    let reply: ChatResponse = response.json().await.map_err(|e| AnalysisError::Upstream {
        reason: format!("invalid completions response body: {e}"),
    })?;

    debug!(
        prompt_tokens = reply.usage.prompt_tokens,
        completion_tokens = reply.usage.completion_tokens,
        "Completions call finished"
    );

    let content = reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty())
        .ok_or(AnalysisError::EmptyReply)?;

    Ok((content, reply.usage))
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}
