//! Statistical sentiment model access.
//!
//! The model is a pretrained three-way classifier consumed as a black box.
//! [`HttpSentimentModel`] talks to a text-classification inference endpoint
//! that answers with label/score pairs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use moodflow_core::config::SentimentConfig;
use moodflow_core::types::Polarity;

use crate::error::{AgentError, AgentResult};

/// Polarity plus the model's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub polarity: Polarity,
    pub confidence: f32,
}

#[async_trait]
pub trait SentimentModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn predict(&self, text: &str) -> AgentResult<SentimentPrediction>;
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Inference endpoints answer either `[[{label, score}, ...]]` or a flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(scores) => scores,
        }
    }
}

/// Pick the highest-scoring label.
fn best_prediction(response: ClassificationResponse) -> AgentResult<SentimentPrediction> {
    response
        .into_scores()
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| SentimentPrediction {
            polarity: Polarity::from_model_label(&best.label),
            confidence: best.score,
        })
        .ok_or_else(|| AgentError::parse("classification response has no labels"))
}

/// Text-classification model behind an HTTP inference endpoint.
pub struct HttpSentimentModel {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSentimentModel {
    pub fn from_config(config: &SentimentConfig) -> AgentResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AgentError::config)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl SentimentModel for HttpSentimentModel {
    fn model_name(&self) -> &str {
        self.endpoint.rsplit('/').next().unwrap_or(&self.endpoint)
    }

    async fn predict(&self, text: &str) -> AgentResult<SentimentPrediction> {
        let mut request = self.http.post(&self.endpoint).json(&json!({ "inputs": text }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let body: ClassificationResponse = response.json().await?;
        best_prediction(body)
    }
}
