//! Current-weather lookup.
//!
//! [`WeatherProvider::lookup`] never fails: a missing key, a transport error
//! or an unexpected payload all yield [`WeatherReport::fallback`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use moodflow_core::config::WeatherConfig;
use moodflow_core::types::{WeatherCategory, WeatherReport};

use crate::error::{AgentError, AgentResult};

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn lookup(&self, city: &str) -> WeatherReport;
}

/// weatherapi.com `current.json` client.
pub struct WeatherApiClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    lang: String,
}

impl WeatherApiClient {
    pub fn from_config(config: &WeatherConfig) -> AgentResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AgentError::config)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            lang: config.lang.clone(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fallible lookup, used by [`WeatherProvider::lookup`].
    pub async fn fetch(&self, city: &str) -> AgentResult<WeatherReport> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::config("weather.api_key is not set"))?;

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("key", key), ("q", city), ("lang", self.lang.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        parse_current(&payload)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn lookup(&self, city: &str) -> WeatherReport {
        if !self.is_enabled() {
            debug!(city, "weather lookup disabled, using fallback");
            return WeatherReport::fallback();
        }
        match self.fetch(city).await {
            Ok(report) => report,
            Err(e) => {
                warn!(city, error = %e, "weather lookup failed, using fallback");
                WeatherReport::fallback()
            }
        }
    }
}

/// Decode the `current` block: condition text, `temp_c` and `is_day`.
pub fn parse_current(payload: &Value) -> AgentResult<WeatherReport> {
    let current = payload
        .get("current")
        .ok_or_else(|| AgentError::parse("missing 'current'"))?;

    let condition = current
        .get("condition")
        .and_then(|c| c.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| AgentError::parse("missing 'current.condition.text'"))?;

    let temperature_c = current
        .get("temp_c")
        .and_then(|t| t.as_f64())
        .ok_or_else(|| AgentError::parse("missing 'current.temp_c'"))?;

    let is_day = current
        .get("is_day")
        .and_then(|d| d.as_i64())
        .ok_or_else(|| AgentError::parse("missing 'current.is_day'"))?;

    Ok(WeatherReport {
        category: WeatherCategory::from_condition(condition),
        temperature_c,
        is_dark: is_day != 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_current() {
        let payload = json!({
            "location": { "name": "Ankara" },
            "current": {
                "temp_c": 3.5,
                "is_day": 0,
                "condition": { "text": "Hafif yağmurlu" }
            }
        });
        let report = parse_current(&payload).unwrap();
        assert_eq!(report.category, WeatherCategory::Rainy);
        assert_eq!(report.temperature_c, 3.5);
        assert!(report.is_dark);
    }

    #[test]
    fn test_parse_current_rejects_partial_payload() {
        let payload = json!({ "current": { "temp_c": 12.0, "is_day": 1 } });
        assert!(parse_current(&payload).is_err());
        assert!(parse_current(&json!({ "error": { "code": 1006 } })).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_returns_fallback() {
        let client = WeatherApiClient::from_config(&WeatherConfig::default()).unwrap();
        assert!(!client.is_enabled());
        assert_eq!(client.lookup("İzmir").await, WeatherReport::fallback());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_fallback() {
        let config = WeatherConfig {
            api_key: Some("key".into()),
            endpoint: "http://127.0.0.1:9/v1/current.json".into(),
            timeout_secs: 1,
            ..WeatherConfig::default()
        };
        let client = WeatherApiClient::from_config(&config).unwrap();
        assert_eq!(client.lookup("Bursa").await, WeatherReport::fallback());
    }
}
