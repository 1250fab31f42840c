//! MoodFlow Agent
//!
//! Network collaborators and the request pipeline built on `moodflow-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          ORCHESTRATOR                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  EmotionAnalyzer ── lexicon + SentimentModel + LanguageModel      │
//! │  EventSignalClassifier ── phrase rules + LanguageModel            │
//! │  ContextCollector ── WeatherProvider + clock                      │
//! │  core: affect ─► regulation ─► activity                           │
//! │  ContentRecommender ── MusicCatalog (token refresh, seeded RNG)   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - **llm**: `LanguageModel` contract, Gemini client, prompt builder, answer parsing
//! - **sentiment**: `SentimentModel` contract and HTTP inference client
//! - **weather**: `WeatherProvider` contract and weatherapi.com client
//! - **context**: weather plus local clock into a `ContextSnapshot`
//! - **music**: query candidates, Spotify catalog, recommenders
//! - **service**: emotion analysis, event classification, orchestrator
//! - **stubs**: in-memory collaborators for tests and offline runs
//!
//! # Usage
//!
//! ```rust,no_run
//! use moodflow_agent::Orchestrator;
//! use moodflow_core::Config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let orchestrator = Orchestrator::from_config(&config, None)?;
//! let result = orchestrator
//!     .process("bugün biraz yorgunum", "İstanbul", None, Some(0))
//!     .await?;
//! println!("{} -> {}", result.final_emotion, result.micro_activity_text);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod llm;
pub mod music;
pub mod sentiment;
pub mod service;
pub mod stubs;
pub mod weather;

// Re-exports
pub use context::ContextCollector;
pub use error::{AgentError, AgentResult};
pub use llm::{GeminiClient, LanguageModel, MoodPromptBuilder};
pub use music::{
    ArtistLanguage, CatalogRecommender, CatalogTrack, ContentRecommender, MusicCatalog,
    OfflineRecommender, Recommendation, SpotifyCatalog,
};
pub use sentiment::{HttpSentimentModel, SentimentModel, SentimentPrediction};
pub use service::{
    EmotionAnalysis, EmotionAnalyzer, EventAnalysis, EventSignalClassifier, Orchestrator,
    PipelineResult,
};
pub use weather::{WeatherApiClient, WeatherProvider};
