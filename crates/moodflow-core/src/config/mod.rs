//! Configuration management for MoodFlow.

mod sub_configs;

#[cfg(test)]
mod tests;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use sub_configs::{LlmConfig, LoggingConfig, MusicConfig, SentimentConfig, WeatherConfig};

use sub_configs::has_value;

/// Conventional credential variables, applied after all other sources.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const SPOTIFY_CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const SPOTIFY_CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
pub const SENTIMENT_API_KEY_VAR: &str = "SENTIMENT_API_KEY";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{MOODFLOW_ENV}.toml (environment-specific)
    /// 3. Environment variables with MOODFLOW__ prefix
    /// 4. Credential variables such as GOOGLE_API_KEY
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("MOODFLOW_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("MOODFLOW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.apply_credential_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply credential variables.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_credential_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without consulting the environment.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Overlay credentials from conventional variables.
    ///
    /// `lookup` abstracts the environment so tests do not mutate process state.
    /// Empty values are ignored.
    pub fn apply_credential_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(GOOGLE_API_KEY_VAR) {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = get(WEATHER_API_KEY_VAR) {
            self.weather.api_key = Some(v);
        }
        if let Some(v) = get(SPOTIFY_CLIENT_ID_VAR) {
            self.music.client_id = Some(v);
        }
        if let Some(v) = get(SPOTIFY_CLIENT_SECRET_VAR) {
            self.music.client_secret = Some(v);
        }
        if let Some(v) = get(SENTIMENT_API_KEY_VAR) {
            self.sentiment.api_key = Some(v);
        }
    }

    /// Validate configuration values.
    ///
    /// FAIL FAST: the first invalid field is reported.
    pub fn validate(&self) -> CoreResult<()> {
        let timeouts = [
            ("llm.timeout_secs", self.llm.timeout_secs),
            ("sentiment.timeout_secs", self.sentiment.timeout_secs),
            ("weather.timeout_secs", self.weather.timeout_secs),
            ("music.timeout_secs", self.music.timeout_secs),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(CoreError::ConfigError(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        let endpoints = [
            ("llm.endpoint", &self.llm.endpoint),
            ("sentiment.endpoint", &self.sentiment.endpoint),
            ("weather.endpoint", &self.weather.endpoint),
            ("music.token_url", &self.music.token_url),
            ("music.search_url", &self.music.search_url),
        ];
        for (name, value) in endpoints {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigError(format!("{} must not be empty", name)));
            }
        }

        if self.llm.enabled
            && (self.llm.emotion_model.trim().is_empty() || self.llm.event_model.trim().is_empty())
        {
            return Err(CoreError::ConfigError(
                "llm.emotion_model and llm.event_model must be set when llm.enabled".into(),
            ));
        }

        if self.llm.max_prompt_chars == 0 {
            return Err(CoreError::ConfigError(
                "llm.max_prompt_chars must be greater than 0".into(),
            ));
        }

        if has_value(&self.music.client_id) != has_value(&self.music.client_secret) {
            return Err(CoreError::ConfigError(
                "music.client_id and music.client_secret must be set together".into(),
            ));
        }

        if self.music.search_limit == 0 || self.music.search_limit > 50 {
            return Err(CoreError::ConfigError(format!(
                "music.search_limit must be in 1..=50, got {}",
                self.music.search_limit
            )));
        }

        if !(0.0..=1.0).contains(&self.music.local_preference) {
            return Err(CoreError::ConfigError(format!(
                "music.local_preference must be in [0.0, 1.0], got {}",
                self.music.local_preference
            )));
        }

        Ok(())
    }
}
