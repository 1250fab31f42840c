//! Tests for default configuration values.

use crate::config::{Config, LlmConfig, LoggingConfig, MusicConfig, WeatherConfig};

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_llm_defaults() {
    let llm = LlmConfig::default();
    assert!(llm.enabled);
    assert_eq!(llm.emotion_model, "gemini-2.5-flash-lite");
    assert_eq!(llm.event_model, "gemini-flash-latest");
    assert_eq!(llm.timeout_secs, 15);
    assert_eq!(llm.max_prompt_chars, 2000);
    // No key, no model.
    assert!(!llm.is_available());
}

#[test]
fn test_llm_available_needs_enabled_and_key() {
    let mut llm = LlmConfig {
        api_key: Some("k".into()),
        ..LlmConfig::default()
    };
    assert!(llm.is_available());

    llm.enabled = false;
    assert!(!llm.is_available());

    llm.enabled = true;
    llm.api_key = Some("   ".into());
    assert!(!llm.is_available(), "blank keys count as missing");
}

#[test]
fn test_weather_and_music_defaults() {
    let weather = WeatherConfig::default();
    assert_eq!(weather.lang, "tr");
    assert!(weather.api_key.is_none());

    let music = MusicConfig::default();
    assert_eq!(music.market, "TR");
    assert_eq!(music.search_limit, 30);
    assert_eq!(music.local_preference, 0.5);
    assert!(!music.has_credentials());
}

#[test]
fn test_logging_defaults() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "warn");
    assert!(!logging.include_location);
}
