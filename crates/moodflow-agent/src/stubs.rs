//! In-process collaborators for tests and offline runs.
//!
//! Every external contract ([`LanguageModel`], [`SentimentModel`],
//! [`WeatherProvider`], [`MusicCatalog`]) has a fake here that answers from
//! memory and counts its calls, so the whole pipeline can be driven without
//! network access.
//!
//! ```rust
//! use std::sync::Arc;
//! use moodflow_agent::stubs::{FixedWeather, ScriptedModel};
//!
//! let weather = Arc::new(FixedWeather::fallback());
//! let model = Arc::new(ScriptedModel::answering(r#"{"label": "fear"}"#));
//! assert_eq!(model.calls(), 0);
//! # let _ = weather;
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use moodflow_core::types::{Polarity, WeatherReport};

use crate::error::{AgentError, AgentResult};
use crate::llm::LanguageModel;
use crate::music::{CatalogTrack, MusicCatalog};
use crate::sentiment::{SentimentModel, SentimentPrediction};
use crate::weather::WeatherProvider;

/// Weather provider that always reports the same conditions.
#[derive(Debug, Clone)]
pub struct FixedWeather {
    report: WeatherReport,
}

impl FixedWeather {
    pub fn new(report: WeatherReport) -> Self {
        Self { report }
    }

    /// Behaves like a provider whose lookups all fail.
    pub fn fallback() -> Self {
        Self::new(WeatherReport::fallback())
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn lookup(&self, _city: &str) -> WeatherReport {
        self.report.clone()
    }
}

/// Language model with a canned answer. Records every prompt it receives.
pub struct ScriptedModel {
    answer: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with a transport error.
    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> AgentResult<String> {
        self.prompts.lock().push(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| AgentError::http("scripted model is offline"))
    }
}

/// Sentiment model with a fixed prediction.
pub struct FixedSentiment {
    prediction: SentimentPrediction,
    texts: Mutex<Vec<String>>,
}

impl FixedSentiment {
    pub fn new(polarity: Polarity, confidence: f32) -> Self {
        Self {
            prediction: SentimentPrediction {
                polarity,
                confidence,
            },
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.texts.lock().len()
    }

    /// Texts passed to `predict`, in call order.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }
}

#[async_trait]
impl SentimentModel for FixedSentiment {
    fn model_name(&self) -> &str {
        "fixed"
    }

    async fn predict(&self, text: &str) -> AgentResult<SentimentPrediction> {
        self.texts.lock().push(text.to_string());
        Ok(self.prediction)
    }
}

/// Sentiment model whose every call fails.
#[derive(Debug, Default)]
pub struct FailingSentiment;

#[async_trait]
impl SentimentModel for FailingSentiment {
    fn model_name(&self) -> &str {
        "failing"
    }

    async fn predict(&self, _text: &str) -> AgentResult<SentimentPrediction> {
        Err(AgentError::http("sentiment endpoint unreachable"))
    }
}

/// Music catalog answering every search with the same tracks.
///
/// Tokens are issued as `token-1`, `token-2`, ... Searches made with one of
/// the first `rejected_tokens` tokens answer 401.
pub struct FakeCatalog {
    tracks: Vec<CatalogTrack>,
    rejected_tokens: usize,
    reject_token_requests: bool,
    fail_searches: bool,
    token_delay: Option<Duration>,
    token_fetches: AtomicUsize,
    searches: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_tracks(tracks: Vec<CatalogTrack>) -> Self {
        Self {
            tracks,
            rejected_tokens: 0,
            reject_token_requests: false,
            fail_searches: false,
            token_delay: None,
            token_fetches: AtomicUsize::new(0),
            searches: AtomicUsize::new(0),
        }
    }

    /// Reject searches made with the first `count` issued tokens.
    pub fn rejecting_tokens(mut self, count: usize) -> Self {
        self.rejected_tokens = count;
        self
    }

    /// The token endpoint refuses the client credentials.
    pub fn rejecting_token(mut self) -> Self {
        self.reject_token_requests = true;
        self
    }

    /// Searches fail with a transport error.
    pub fn failing_search(mut self) -> Self {
        self.fail_searches = true;
        self
    }

    /// Hold every token request for `delay`, so concurrent refreshes overlap.
    pub fn with_token_delay(mut self, delay: Duration) -> Self {
        self.token_delay = Some(delay);
        self
    }

    pub fn token_fetches(&self) -> usize {
        self.token_fetches.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    fn token_number(token: &str) -> usize {
        token
            .strip_prefix("token-")
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}

#[async_trait]
impl MusicCatalog for FakeCatalog {
    async fn fetch_token(&self) -> AgentResult<String> {
        if let Some(delay) = self.token_delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_token_requests {
            return Err(AgentError::MusicAuthorization {
                message: "invalid client".to_string(),
            });
        }
        let n = self.token_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{}", n))
    }

    async fn search(&self, token: &str, _query: &str) -> AgentResult<Vec<CatalogTrack>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail_searches {
            return Err(AgentError::http("connection reset"));
        }
        let n = Self::token_number(token);
        if n == 0 || n <= self.rejected_tokens {
            return Err(AgentError::Unauthorized {
                service: "fake-catalog".to_string(),
            });
        }
        Ok(self.tracks.clone())
    }
}
