//! Sub-configuration structures for the collaborator adapters.
//!
//! Every field has a serde default so a partial (or empty) TOML file is a
//! valid configuration.

use serde::{Deserialize, Serialize};

/// Generative language model settings.
///
/// The model is used as a capability: when `enabled` is false or no API key
/// is set, the pipeline runs without it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// API key. Usually supplied through `GOOGLE_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the generative language API.
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model used for emotion classification.
    #[serde(default = "default_emotion_model")]
    pub emotion_model: String,

    /// Model used for event classification.
    #[serde(default = "default_event_model")]
    pub event_model: String,

    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_max_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// Longest user text (characters) copied into a prompt.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

fn default_true() -> bool {
    true
}

fn default_llm_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_emotion_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_event_model() -> String {
    "gemini-flash-latest".to_string()
}

fn default_llm_temperature() -> f32 {
    0.0
}

fn default_llm_max_tokens() -> u32 {
    128
}

fn default_llm_timeout() -> u64 {
    15
}

fn default_max_prompt_chars() -> usize {
    2000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_key: None,
            endpoint: default_llm_endpoint(),
            emotion_model: default_emotion_model(),
            event_model: default_event_model(),
            temperature: default_llm_temperature(),
            max_output_tokens: default_llm_max_tokens(),
            timeout_secs: default_llm_timeout(),
            max_prompt_chars: default_max_prompt_chars(),
        }
    }
}

impl LlmConfig {
    /// Whether a generative model can be constructed from this config.
    pub fn is_available(&self) -> bool {
        self.enabled && has_value(&self.api_key)
    }
}

/// Statistical sentiment model settings.
///
/// The model is reached through a text-classification inference endpoint
/// that answers `[[{"label": ..., "score": ...}]]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentimentConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_sentiment_endpoint")]
    pub endpoint: String,

    /// Bearer token. Usually supplied through `SENTIMENT_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_sentiment_timeout")]
    pub timeout_secs: u64,
}

fn default_sentiment_endpoint() -> String {
    "https://api-inference.huggingface.co/models/savasy/bert-base-turkish-sentiment-cased"
        .to_string()
}

fn default_sentiment_timeout() -> u64 {
    10
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoint: default_sentiment_endpoint(),
            api_key: None,
            timeout_secs: default_sentiment_timeout(),
        }
    }
}

/// Weather lookup settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    /// Usually supplied through `WEATHER_API_KEY`. Without it every lookup
    /// returns the fallback report.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,

    /// Language for condition text.
    #[serde(default = "default_weather_lang")]
    pub lang: String,

    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_endpoint() -> String {
    "https://api.weatherapi.com/v1/current.json".to_string()
}

fn default_weather_lang() -> String {
    "tr".to_string()
}

fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_weather_endpoint(),
            lang: default_weather_lang(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

/// Music catalog settings (client-credentials flow).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicConfig {
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_market")]
    pub market: String,

    /// Tracks requested per search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Probability of preferring a local-language artist when both pools
    /// are non-empty.
    #[serde(default = "default_local_preference")]
    pub local_preference: f64,

    #[serde(default = "default_music_timeout")]
    pub timeout_secs: u64,
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_search_url() -> String {
    "https://api.spotify.com/v1/search".to_string()
}

fn default_market() -> String {
    "TR".to_string()
}

fn default_search_limit() -> u32 {
    30
}

fn default_local_preference() -> f64 {
    0.5
}

fn default_music_timeout() -> u64 {
    15
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: default_token_url(),
            search_url: default_search_url(),
            market: default_market(),
            search_limit: default_search_limit(),
            local_preference: default_local_preference(),
            timeout_secs: default_music_timeout(),
        }
    }
}

impl MusicConfig {
    pub fn has_credentials(&self) -> bool {
        has_value(&self.client_id) && has_value(&self.client_secret)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub include_location: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            include_location: false,
        }
    }
}

pub(crate) fn has_value(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.trim().is_empty())
}
