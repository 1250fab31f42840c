//! Event-message classification: phrase rules, optionally backed by the
//! generative model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use moodflow_core::event::{
    fuse_event, trace_decision, EventDecision, EventRules, ModelEventOpinion, PressureEvidence,
    RuleScan,
};
use moodflow_core::types::{Stage, Trace};

use crate::llm::{parse_event_response, LanguageModel, MoodPromptBuilder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAnalysis {
    pub decision: EventDecision,
    /// Set only when the model was asked and answered usably.
    pub model_opinion: Option<ModelEventOpinion>,
}

pub struct EventSignalClassifier {
    rules: EventRules,
    model: Option<Arc<dyn LanguageModel>>,
    prompts: MoodPromptBuilder,
}

impl EventSignalClassifier {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self::with_rules(EventRules::turkish(), model)
    }

    pub fn with_rules(rules: EventRules, model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self {
            rules,
            model,
            prompts: MoodPromptBuilder::new(),
        }
    }

    /// Replace the prompt builder used for the model opinion.
    pub fn with_prompts(mut self, prompts: MoodPromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub async fn classify(&self, text: Option<&str>) -> EventAnalysis {
        let mut trace = Trace::new();
        self.classify_traced(text, &mut trace).await
    }

    pub async fn classify_traced(&self, text: Option<&str>, trace: &mut Trace) -> EventAnalysis {
        let scan = self.rules.scan(text);

        let evidence = match &scan {
            RuleScan::Pressure(evidence) => evidence,
            terminal => {
                if let RuleScan::EnergyUp { phrase } = terminal {
                    trace.push(Stage::Event, format!("event rule: energy-up phrase '{}'", phrase));
                }
                // Terminal scans always map to a decision.
                let decision = EventDecision::from_terminal_scan(terminal)
                    .unwrap_or_else(|| fuse_event(&PressureEvidence::default(), None));
                trace_decision(&decision, trace);
                return EventAnalysis {
                    decision,
                    model_opinion: None,
                };
            }
        };

        trace.push(
            Stage::Event,
            format!(
                "event rule: {} pressure hit(s) in {} words",
                evidence.hit_count(),
                evidence.word_count
            ),
        );

        let model_opinion = match (evidence.needs_model_opinion(), text) {
            (true, Some(text)) => self.model_opinion(text, trace).await,
            _ => None,
        };

        let decision = fuse_event(evidence, model_opinion);
        trace_decision(&decision, trace);
        EventAnalysis {
            decision,
            model_opinion,
        }
    }

    async fn model_opinion(&self, text: &str, trace: &mut Trace) -> Option<ModelEventOpinion> {
        let model = self.model.as_ref()?;
        let prompt = self.prompts.build_event_prompt(text);

        let answer = match model.generate(&prompt).await {
            Ok(raw) => parse_event_response(&raw),
            Err(e) => Err(e),
        };
        match answer {
            Ok(opinion) => {
                trace.push(
                    Stage::Event,
                    format!(
                        "event model: {} intensity={:.2}",
                        opinion.event_type, opinion.intensity
                    ),
                );
                Some(opinion)
            }
            Err(e) => {
                warn!(model = model.model_name(), error = %e, "event model opinion unavailable");
                trace.push(Stage::Event, "event model: unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::ScriptedModel;
    use moodflow_core::event::EventRule;
    use moodflow_core::types::EventType;

    fn with_model(answer: &str) -> (EventSignalClassifier, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel::answering(answer));
        (EventSignalClassifier::new(Some(model.clone())), model)
    }

    #[tokio::test]
    async fn test_blank_text_is_neutral() {
        let (classifier, model) = with_model(r#"{"event_type":"pressure","intensity":0.9}"#);
        for text in [None, Some(""), Some("   ")] {
            let analysis = classifier.classify(text).await;
            assert_eq!(analysis.decision.rule, EventRule::NoText);
            assert_eq!(analysis.decision.signal.event_type, EventType::Neutral);
            assert_eq!(analysis.decision.signal.intensity(), 0.0);
        }
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_strong_rule_evidence_skips_model() {
        let (classifier, model) = with_model(r#"{"event_type":"energy_down","intensity":0.2}"#);
        let analysis = classifier
            .classify(Some("deadline yaklaşıyor, acil revize gerekiyor"))
            .await;
        assert_eq!(analysis.decision.rule, EventRule::RulePressure);
        assert_eq!(analysis.decision.signal.event_type, EventType::Pressure);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_weak_evidence_asks_model() {
        let (classifier, model) = with_model(r#"{"event_type":"energy_down","intensity":0.1}"#);
        let mut trace = Trace::new();
        let analysis = classifier
            .classify_traced(Some("bugün pek bir şey olmadı"), &mut trace)
            .await;
        assert_eq!(model.calls(), 1);
        assert_eq!(analysis.decision.rule, EventRule::ModelOpinion);
        assert_eq!(analysis.decision.signal.event_type, EventType::EnergyDown);
        assert_eq!(analysis.decision.signal.intensity(), 0.4);
        assert!(trace.contains(Stage::Event, "event model"));
    }

    #[tokio::test]
    async fn test_failed_model_leaves_rules() {
        let classifier = EventSignalClassifier::new(Some(Arc::new(ScriptedModel::failing())));
        let analysis = classifier.classify(Some("bugün pek bir şey olmadı")).await;
        assert!(analysis.model_opinion.is_none());
        assert_eq!(analysis.decision.rule, EventRule::NoSignal);
    }

    #[tokio::test]
    async fn test_without_model_rules_decide() {
        let classifier = EventSignalClassifier::new(None);
        let analysis = classifier.classify(Some("bugün pek bir şey olmadı")).await;
        assert_eq!(analysis.decision.signal.event_type, EventType::Neutral);
    }
}
