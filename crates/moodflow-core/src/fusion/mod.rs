//! Emotion fusion: reconcile lexicon, statistical and generative labels.
//!
//! # Precedence
//!
//! 1. A non-neutral lexicon label wins outright.
//! 2. A non-neutral generative label that disagrees with the statistical
//!    label wins.
//! 3. Lexicon and generative both neutral ⇒ neutral, whatever the
//!    statistical model says.
//! 4. Otherwise the statistical label is accepted as corroborated.
//!
//! The generative signal is optional. When the generative model is not
//! configured (`None`), rule 2 cannot fire and rule 3 does not apply, so the
//! statistical label is accepted on its own. A configured model that answered
//! `neutral` (or failed, which resolves to `neutral`) still triggers rule 3.

use serde::{Deserialize, Serialize};

use crate::types::{EmotionLabel, Stage, Trace};

/// The three classifier opinions fed into fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionInputs {
    pub lexicon: EmotionLabel,
    pub statistical: EmotionLabel,
    /// `None` when the generative classifier is not configured.
    pub generative: Option<EmotionLabel>,
}

/// Which precedence rule decided the final label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionRule {
    LexiconPrecedence,
    GenerativeArbitration,
    LowSignalConsensus,
    StatisticalCorroborated,
}

impl FusionRule {
    pub fn description(&self) -> &'static str {
        match self {
            Self::LexiconPrecedence => "lexicon precedence",
            Self::GenerativeArbitration => "statistical/generative disagreement -> generative",
            Self::LowSignalConsensus => "low signal -> neutral",
            Self::StatisticalCorroborated => "statistical accepted as corroborated",
        }
    }
}

/// Fused label plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionDecision {
    pub label: EmotionLabel,
    pub rule: FusionRule,
}

/// Apply the precedence policy.
pub fn resolve(inputs: FusionInputs) -> FusionDecision {
    let FusionInputs {
        lexicon,
        statistical,
        generative,
    } = inputs;

    if !lexicon.is_neutral() {
        return FusionDecision {
            label: lexicon,
            rule: FusionRule::LexiconPrecedence,
        };
    }

    if let Some(gen) = generative {
        if !gen.is_neutral() && gen != statistical {
            return FusionDecision {
                label: gen,
                rule: FusionRule::GenerativeArbitration,
            };
        }
        if gen.is_neutral() {
            return FusionDecision {
                label: EmotionLabel::Neutral,
                rule: FusionRule::LowSignalConsensus,
            };
        }
    }

    FusionDecision {
        label: statistical,
        rule: FusionRule::StatisticalCorroborated,
    }
}

/// [`resolve`] plus a trace line naming the deciding rule.
pub fn resolve_traced(inputs: FusionInputs, trace: &mut Trace) -> FusionDecision {
    let decision = resolve(inputs);
    trace.push(
        Stage::Fusion,
        format!("fusion: {} -> {}", decision.rule.description(), decision.label),
    );
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use EmotionLabel::*;

    fn fuse(lexicon: EmotionLabel, statistical: EmotionLabel, generative: Option<EmotionLabel>) -> FusionDecision {
        resolve(FusionInputs {
            lexicon,
            statistical,
            generative,
        })
    }

    #[test]
    fn test_lexicon_wins_outright() {
        let d = fuse(Anger, Happiness, Some(Sadness));
        assert_eq!(d.label, Anger);
        assert_eq!(d.rule, FusionRule::LexiconPrecedence);
    }

    #[test]
    fn test_generative_arbitrates_disagreement() {
        let d = fuse(Neutral, Happiness, Some(Sadness));
        assert_eq!(d.label, Sadness);
        assert_eq!(d.rule, FusionRule::GenerativeArbitration);
    }

    #[test]
    fn test_generative_agreeing_corroborates_statistical() {
        let d = fuse(Neutral, Happiness, Some(Happiness));
        assert_eq!(d.label, Happiness);
        assert_eq!(d.rule, FusionRule::StatisticalCorroborated);
    }

    #[test]
    fn test_statistical_accepted_without_generative_model() {
        let d = fuse(Neutral, Happiness, None);
        assert_eq!(d.label, Happiness);
        assert_eq!(d.rule, FusionRule::StatisticalCorroborated);
    }

    #[test]
    fn test_explicit_generative_neutral_is_low_signal() {
        let d = fuse(Neutral, Happiness, Some(Neutral));
        assert_eq!(d.label, Neutral);
        assert_eq!(d.rule, FusionRule::LowSignalConsensus);
    }

    #[test]
    fn test_all_neutral() {
        assert_eq!(fuse(Neutral, Neutral, Some(Neutral)).label, Neutral);
        assert_eq!(fuse(Neutral, Neutral, None).label, Neutral);
    }

    #[test]
    fn test_generative_only_opinion_wins() {
        // Statistical is neutral, generative says fear: they disagree.
        let d = fuse(Neutral, Neutral, Some(Fear));
        assert_eq!(d.label, Fear);
        assert_eq!(d.rule, FusionRule::GenerativeArbitration);
    }

    #[test]
    fn test_every_decision_is_traced() {
        let mut trace = Trace::new();
        resolve_traced(
            FusionInputs {
                lexicon: Neutral,
                statistical: Happiness,
                generative: Some(Sadness),
            },
            &mut trace,
        );
        assert_eq!(trace.len(), 1);
        assert!(trace.contains(Stage::Fusion, "generative"));
        assert!(trace.contains(Stage::Fusion, "sadness"));
    }
}
