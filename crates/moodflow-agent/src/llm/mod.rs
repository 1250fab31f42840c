//! Generative language model access.
//!
//! The model is a capability that is either present or absent at
//! construction time. [`LanguageModel`] is the narrow contract (prompt in,
//! raw text out); [`GeminiClient`] implements it over HTTP. Response parsing
//! lives here too, so every caller applies the same recovery rules.

pub mod prompt;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use moodflow_core::config::LlmConfig;
use moodflow_core::event::ModelEventOpinion;
use moodflow_core::types::{EmotionLabel, EventType};

use crate::error::{AgentError, AgentResult};

pub use prompt::MoodPromptBuilder;

/// Intensity assumed when the model omits it.
pub const DEFAULT_MODEL_INTENSITY: f64 = 0.5;

/// Prompt in, raw text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Identifier used in logs and traces.
    fn model_name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> AgentResult<String>;
}

/// Google Generative Language API client (`models/{model}:generateContent`).
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Build a client for `model` from the shared LLM settings.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &LlmConfig, model: &str) -> AgentResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AgentError::config("llm.api_key is not set"))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AgentError::config)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> AgentResult<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens,
            },
        });

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        let text = candidate_text(&payload)?;
        debug!(model = %self.model, chars = text.len(), "generative model answered");
        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate.
fn candidate_text(payload: &Value) -> AgentResult<String> {
    let parts = payload
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| AgentError::parse("response has no candidate content"))?;

    Ok(parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join(""))
}

/// Return the first balanced `{...}` object in `raw`, skipping braces that
/// appear inside JSON strings.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_object(raw: &str) -> AgentResult<Value> {
    let object = extract_json_object(raw.trim())
        .ok_or_else(|| AgentError::parse(format!("no JSON object in response: {:?}", raw)))?;
    Ok(serde_json::from_str(object)?)
}

/// Decode `{"label": ...}`. Labels outside the closed set are errors.
pub fn parse_emotion_response(raw: &str) -> AgentResult<EmotionLabel> {
    let json = parse_object(raw)?;
    let label = json
        .get("label")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AgentError::parse("missing 'label'"))?;
    EmotionLabel::parse(label).ok_or_else(|| AgentError::parse(format!("unknown label '{}'", label)))
}

/// Decode `{"event_type": ..., "intensity": ...}`.
///
/// A missing intensity defaults to [`DEFAULT_MODEL_INTENSITY`]; numeric
/// strings are accepted; the value is clamped to `[0, 1]`.
pub fn parse_event_response(raw: &str) -> AgentResult<ModelEventOpinion> {
    let json = parse_object(raw)?;

    let type_str = json
        .get("event_type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AgentError::parse("missing 'event_type'"))?;
    let event_type = EventType::parse(type_str)
        .ok_or_else(|| AgentError::parse(format!("unknown event_type '{}'", type_str)))?;

    let intensity = match json.get("intensity") {
        None | Some(Value::Null) => DEFAULT_MODEL_INTENSITY,
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| AgentError::parse("intensity is not a finite number"))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| AgentError::parse(format!("intensity '{}': {}", s, e)))?,
        Some(other) => return Err(AgentError::parse(format!("intensity has type {}", other))),
    };
    if intensity.is_nan() {
        return Err(AgentError::parse("intensity is NaN"));
    }

    Ok(ModelEventOpinion {
        event_type,
        intensity: intensity.clamp(0.0, 1.0),
    })
}
