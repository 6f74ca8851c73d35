//! OpenAI API Provider
//!
//! LLM provider using OpenAI's Responses API.
//! Returns LlmResponse with token usage metrics for cost tracking.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::{LlmProvider, LlmResponse, ResponseMetadata, ResponseTiming, TokenUsage};
use crate::ai::validation::extract_json_with_recovery_status;
use crate::config::LlmConfig;
use crate::constants::llm::DEFAULT_API_BASE;
use crate::types::{Result, SectorError};

const SERVICE: &str = "OpenAI";

/// OpenAI API Provider with secure API key handling
pub struct OpenAiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SectorError::Config("OPENAI_API_KEY is required".to_string()))?;

        let api_base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SectorError::transport(SERVICE, format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key.to_string()),
            api_base,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            client,
        })
    }

    fn build_request<'a>(&'a self, system_prompt: &'a str, user_prompt: &'a str) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage::new("system", system_prompt.trim()),
                InputMessage::new("user", user_prompt.trim()),
            ],
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<LlmResponse> {
        info!(
            "Generating with OpenAI (model: {}, temperature: {})",
            self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(system_prompt, user_prompt);
        let url = format!("{}/responses", self.api_base);

        debug!("Sending request to {}", url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| SectorError::transport(SERVICE, e))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SectorError::remote(SERVICE, status.as_u16(), body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SectorError::transport(SERVICE, format!("unreadable response body: {}", e)))?;

        let usage = extract_usage(&body);
        let text = extract_output_text(&body);
        if text.trim().is_empty() {
            return Err(SectorError::EmptyResponse {
                provider: SERVICE.to_string(),
            });
        }

        debug!(
            "Received {} chars from OpenAI ({} tokens), parsing JSON",
            text.len(),
            usage.total()
        );
        let (content, recovered) = extract_json_with_recovery_status(&text)?;

        Ok(LlmResponse {
            content,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
            metadata: ResponseMetadata {
                model: self.model.clone(),
                provider: "openai".to_string(),
            },
            recovered,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// =============================================================================
// Response Shapes
// =============================================================================

/// Collect the model's text from whichever response shape came back.
///
/// Recognised, in order: `output[].content[]` parts of type `output_text` or
/// `text` inside `message` outputs (joined by newlines), a top-level
/// `output_text` string, and chat-completions `choices[0].message.content`.
fn extract_output_text(body: &Value) -> String {
    let chunks: Vec<&str> = body
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|output| output.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|output| output.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| {
            matches!(
                part.get("type").and_then(Value::as_str),
                Some("output_text" | "text")
            )
        })
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if !chunks.is_empty() {
        return chunks.join("\n");
    }

    body.get("output_text")
        .and_then(Value::as_str)
        .or_else(|| {
            body.pointer("/choices/0/message/content")
                .and_then(Value::as_str)
        })
        .unwrap_or_default()
        .to_string()
}

fn extract_usage(body: &Value) -> TokenUsage {
    let count = |name: &str| {
        body.pointer(&format!("/usage/{}", name))
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32
    };
    TokenUsage {
        input_tokens: count("input_tokens"),
        output_tokens: count("output_tokens"),
    }
}

// Request types

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: [InputText<'a>; 1],
}

impl<'a> InputMessage<'a> {
    fn new(role: &'static str, text: &'a str) -> Self {
        Self {
            role,
            content: [InputText {
                kind: "input_text",
                text,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct InputText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}
