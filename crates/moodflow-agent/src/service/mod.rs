//! Mood pipeline orchestration.
//!
//! One [`Orchestrator::process`] call runs the full pipeline for a single
//! user action:
//! 1. Emotion analysis (lexicon, statistical, generative, fusion)
//! 2. Event-message classification
//! 3. Micro signal mapping
//! 4. Context collection (weather and clock)
//! 5. Affect vector composition
//! 6. Regulation planning
//! 7. Content recommendation and micro-activity selection
//!
//! Collaborators are built once and shared read-only; every request owns its
//! own state, plan and trace.

pub mod emotion;
pub mod event;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use moodflow_core::activity::{select_activity, MicroActivity};
use moodflow_core::affect::{AffectInputs, AffectVectorCalculator};
use moodflow_core::regulation::{RegulationPlan, RegulationPlanner};
use moodflow_core::types::{
    AffectBreakdown, AffectState, ContextSnapshot, EmotionLabel, MicroSignal, Stage, Trace,
};
use moodflow_core::Config;

use crate::context::ContextCollector;
use crate::error::{AgentError, AgentResult};
use crate::llm::{GeminiClient, LanguageModel, MoodPromptBuilder};
use crate::music::{
    CatalogRecommender, ContentRecommender, OfflineRecommender, Recommendation, SpotifyCatalog,
};
use crate::sentiment::{HttpSentimentModel, SentimentModel};
use crate::weather::WeatherApiClient;

pub use emotion::{EmotionAnalysis, EmotionAnalyzer};
pub use event::{EventAnalysis, EventSignalClassifier};

// ============================================================================
// RESULT
// ============================================================================

/// Everything one pipeline run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub request_id: Uuid,
    pub final_emotion: EmotionLabel,
    pub emotion: EmotionAnalysis,
    pub event: EventAnalysis,
    pub micro: MicroSignal,
    pub affect_state: AffectState,
    pub affect_breakdown: AffectBreakdown,
    pub regulation: RegulationPlan,
    pub context: ContextSnapshot,
    pub recommendation: Recommendation,
    pub micro_activity: MicroActivity,
    pub micro_activity_text: String,
    pub trace: Trace,
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

pub struct Orchestrator {
    emotion: EmotionAnalyzer,
    events: EventSignalClassifier,
    context: ContextCollector,
    calculator: AffectVectorCalculator,
    planner: RegulationPlanner,
    recommender: Arc<dyn ContentRecommender>,
}

impl Orchestrator {
    /// Assemble from already-built parts.
    pub fn new(
        emotion: EmotionAnalyzer,
        events: EventSignalClassifier,
        context: ContextCollector,
        recommender: Arc<dyn ContentRecommender>,
    ) -> Self {
        Self {
            emotion,
            events,
            context,
            calculator: AffectVectorCalculator::new(),
            planner: RegulationPlanner::new(),
            recommender,
        }
    }

    /// Build the production collaborators from configuration.
    ///
    /// Missing credentials disable the matching collaborator instead of
    /// failing: no LLM key means no generative classifier, no music
    /// credentials means the placeholder recommender. `seed` makes the
    /// recommendation draw reproducible.
    pub fn from_config(config: &Config, seed: Option<u64>) -> AgentResult<Self> {
        let sentiment: Option<Arc<dyn SentimentModel>> = if config.sentiment.enabled {
            Some(Arc::new(HttpSentimentModel::from_config(&config.sentiment)?))
        } else {
            None
        };

        let (emotion_model, event_model): (
            Option<Arc<dyn LanguageModel>>,
            Option<Arc<dyn LanguageModel>>,
        ) = if config.llm.is_available() {
            (
                Some(Arc::new(GeminiClient::from_config(
                    &config.llm,
                    &config.llm.emotion_model,
                )?)),
                Some(Arc::new(GeminiClient::from_config(
                    &config.llm,
                    &config.llm.event_model,
                )?)),
            )
        } else {
            info!("generative model not configured; lexicon and statistical classifiers only");
            (None, None)
        };

        let weather = Arc::new(WeatherApiClient::from_config(&config.weather)?);

        let recommender: Arc<dyn ContentRecommender> = if config.music.has_credentials() {
            let catalog = Arc::new(SpotifyCatalog::from_config(&config.music)?);
            let recommender = match seed {
                Some(seed) => CatalogRecommender::with_seed(catalog, seed),
                None => CatalogRecommender::new(catalog),
            };
            Arc::new(recommender.with_local_preference(config.music.local_preference))
        } else {
            info!("music catalog credentials missing; recommendations use the placeholder");
            Arc::new(OfflineRecommender)
        };

        let prompts = MoodPromptBuilder::new().with_max_content_length(config.llm.max_prompt_chars);

        Ok(Self::new(
            EmotionAnalyzer::new(sentiment, emotion_model).with_prompts(prompts.clone()),
            EventSignalClassifier::new(event_model).with_prompts(prompts),
            ContextCollector::new(weather),
            recommender,
        ))
    }

    /// Run the pipeline for one user action.
    ///
    /// Fails only on empty `user_text` or when the music catalog keeps
    /// rejecting our credentials; every other collaborator failure degrades
    /// to a fallback.
    pub async fn process(
        &self,
        user_text: &str,
        city: &str,
        event_text: Option<&str>,
        micro_input: Option<i64>,
    ) -> AgentResult<PipelineResult> {
        if user_text.trim().is_empty() {
            return Err(AgentError::EmptyInput);
        }

        let request_id = Uuid::new_v4();
        info!(%request_id, city, "processing mood entry");
        let mut trace = Trace::new();

        let emotion = self.emotion.analyze_traced(user_text, &mut trace).await;
        let final_emotion = emotion.final_emotion;

        let event = self.events.classify_traced(event_text, &mut trace).await;

        let micro = MicroSignal::from_input(micro_input);
        trace.push(
            Stage::Micro,
            format!("micro: {:?} -> {:?} ({})", micro_input, micro, micro.score()),
        );

        let context = self.context.collect_traced(city, &mut trace).await;

        let affect = self.calculator.calculate_traced(
            &AffectInputs {
                emotion: final_emotion,
                event: event.decision.signal,
                micro,
                context: context.clone(),
            },
            &mut trace,
        );

        let regulation = self.planner.plan_traced(&affect.state, &mut trace);

        let recommendation = self
            .recommender
            .recommend(final_emotion, &affect.state, &regulation)
            .await?;
        trace.push(
            Stage::Recommendation,
            format!(
                "recommendation: '{}' -> {} / {}",
                recommendation.query, recommendation.title, recommendation.author
            ),
        );

        let micro_activity = select_activity(final_emotion, &regulation);
        debug!(%request_id, emotion = %final_emotion, activity = ?micro_activity, "pipeline finished");

        Ok(PipelineResult {
            request_id,
            final_emotion,
            emotion,
            event,
            micro,
            affect_state: affect.state,
            affect_breakdown: affect.breakdown,
            regulation,
            context,
            recommendation,
            micro_activity,
            micro_activity_text: micro_activity.text().to_string(),
            trace,
        })
    }
}
