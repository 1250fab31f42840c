//! Emotion analysis: lexicon, statistical and generative classifiers fused
//! into one label.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use moodflow_core::fusion::{self, FusionDecision, FusionInputs};
use moodflow_core::lexicon::{LexiconClassifier, LexiconRule, LexiconVerdict};
use moodflow_core::text::normalize;
use moodflow_core::types::{EmotionLabel, Stage, Trace};

use crate::llm::{parse_emotion_response, LanguageModel, MoodPromptBuilder};
use crate::sentiment::SentimentModel;

/// Every classifier opinion plus the fused label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub lexicon: LexiconVerdict,
    /// `None` when the short-text guard stopped the analysis.
    pub statistical: Option<EmotionLabel>,
    /// `None` when the generative classifier is absent or was skipped.
    pub generative: Option<EmotionLabel>,
    /// `None` when the short-text guard stopped the analysis.
    pub fusion: Option<FusionDecision>,
    pub final_emotion: EmotionLabel,
}

impl EmotionAnalysis {
    pub fn was_guarded(&self) -> bool {
        self.lexicon.rule == LexiconRule::ShortText
    }
}

pub struct EmotionAnalyzer {
    lexicon: &'static LexiconClassifier,
    sentiment: Option<Arc<dyn SentimentModel>>,
    generative: Option<Arc<dyn LanguageModel>>,
    prompts: MoodPromptBuilder,
}

impl EmotionAnalyzer {
    pub fn new(
        sentiment: Option<Arc<dyn SentimentModel>>,
        generative: Option<Arc<dyn LanguageModel>>,
    ) -> Self {
        Self {
            lexicon: LexiconClassifier::builtin(),
            sentiment,
            generative,
            prompts: MoodPromptBuilder::new(),
        }
    }

    /// Replace the prompt builder used for the generative classifier.
    pub fn with_prompts(mut self, prompts: MoodPromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Lexicon only; the other classifiers are treated as absent.
    pub fn lexicon_only() -> Self {
        Self::new(None, None)
    }

    pub fn has_generative(&self) -> bool {
        self.generative.is_some()
    }

    pub async fn analyze(&self, text: &str) -> EmotionAnalysis {
        let mut trace = Trace::new();
        self.analyze_traced(text, &mut trace).await
    }

    /// Run the classifiers in order and fuse their labels.
    ///
    /// Every classifier sees the normalized text. Short text without any
    /// lexicon word is answered `neutral` right away; the models are not
    /// consulted.
    pub async fn analyze_traced(&self, text: &str, trace: &mut Trace) -> EmotionAnalysis {
        let normalized = normalize(text);
        let lexicon = self.lexicon.classify_traced(&normalized, trace);

        if lexicon.rule == LexiconRule::ShortText {
            trace.push(Stage::Guard, "guard: short text without lexicon words -> neutral");
            return EmotionAnalysis {
                lexicon,
                statistical: None,
                generative: None,
                fusion: None,
                final_emotion: EmotionLabel::Neutral,
            };
        }

        let statistical = self.statistical_label(&normalized, trace).await;
        let generative = self.generative_label(&normalized, trace).await;

        let decision = fusion::resolve_traced(
            FusionInputs {
                lexicon: lexicon.label,
                statistical,
                generative,
            },
            trace,
        );

        EmotionAnalysis {
            lexicon,
            statistical: Some(statistical),
            generative,
            fusion: Some(decision),
            final_emotion: decision.label,
        }
    }

    async fn statistical_label(&self, text: &str, trace: &mut Trace) -> EmotionLabel {
        let Some(model) = &self.sentiment else {
            trace.push(Stage::Statistical, "statistical: not configured -> neutral");
            return EmotionLabel::Neutral;
        };

        match model.predict(text).await {
            Ok(prediction) => {
                let label = prediction.polarity.to_emotion();
                trace.push(
                    Stage::Statistical,
                    format!(
                        "statistical: {:?} ({:.2}) -> {}",
                        prediction.polarity, prediction.confidence, label
                    ),
                );
                label
            }
            Err(e) => {
                warn!(model = model.model_name(), error = %e, "sentiment model failed");
                trace.push(Stage::Statistical, "statistical: failed -> neutral");
                EmotionLabel::Neutral
            }
        }
    }

    /// `None` when no generative model is configured; any failure is `neutral`.
    async fn generative_label(&self, text: &str, trace: &mut Trace) -> Option<EmotionLabel> {
        let model = self.generative.as_ref()?;
        let prompt = self.prompts.build_emotion_prompt(text);

        let label = match model.generate(&prompt).await {
            Ok(raw) => match parse_emotion_response(&raw) {
                Ok(label) => label,
                Err(e) => {
                    warn!(model = model.model_name(), error = %e, "unusable emotion answer");
                    EmotionLabel::Neutral
                }
            },
            Err(e) => {
                warn!(model = model.model_name(), error = %e, "generative model failed");
                EmotionLabel::Neutral
            }
        };
        trace.push(Stage::Generative, format!("generative -> {}", label));
        Some(label)
    }
}
