//! Short physical or attentional activity suggested alongside a recommendation.

use serde::{Deserialize, Serialize};

use crate::regulation::{RegulationPlan, DIRECTIVE_THRESHOLD};
use crate::types::EmotionLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroActivity {
    SlowBreathing,
    QuietBreak,
    BriskWalk,
    WarmDrinkBreak,
    BreathingExercise,
    ShortWalk,
    MessageSomeone,
    RestEyes,
    ShortBreak,
}

impl MicroActivity {
    pub fn text(&self) -> &'static str {
        match self {
            Self::SlowBreathing => "2 minutes of slow breathing (4-6).",
            Self::QuietBreak => "Silence your phone and take a short break.",
            Self::BriskWalk => "5 minutes of brisk walking plus deep breaths.",
            Self::WarmDrinkBreak => "Get a warm drink and take a short writing break.",
            Self::BreathingExercise => "4-6 breathing exercise.",
            Self::ShortWalk => "A short 10 minute walk.",
            Self::MessageSomeone => "Send a short message to someone you love.",
            Self::RestEyes => "Rest your eyes for 2 minutes.",
            Self::ShortBreak => "Take a short break.",
        }
    }

    fn for_emotion(label: EmotionLabel) -> Self {
        match label {
            EmotionLabel::Anger => Self::BriskWalk,
            EmotionLabel::Sadness => Self::WarmDrinkBreak,
            EmotionLabel::Fear => Self::BreathingExercise,
            EmotionLabel::Surprise => Self::ShortWalk,
            EmotionLabel::Happiness => Self::MessageSomeone,
            EmotionLabel::Neutral => Self::RestEyes,
        }
    }
}

/// Pick an activity.
///
/// A strongly lowered arousal target means slow breathing; otherwise a raised
/// calm target means a quiet break; otherwise the emotion decides.
pub fn select_activity(label: EmotionLabel, plan: &RegulationPlan) -> MicroActivity {
    if plan.delta.arousal <= -DIRECTIVE_THRESHOLD {
        MicroActivity::SlowBreathing
    } else if plan.delta.environmental_calm >= DIRECTIVE_THRESHOLD {
        MicroActivity::QuietBreak
    } else {
        MicroActivity::for_emotion(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regulation::RegulationPlanner;
    use crate::types::{AffectDelta, AffectState};

    fn plan_for(values: AffectDelta) -> RegulationPlan {
        RegulationPlanner::new().plan(&AffectState::from_raw(values))
    }

    #[test]
    fn test_low_arousal_target_wins() {
        // arousal 70 -> delta -20; calm 30 -> delta +30
        let plan = plan_for(AffectDelta::new(55, 70, 60, 30, 50));
        assert_eq!(select_activity(EmotionLabel::Happiness, &plan), MicroActivity::SlowBreathing);
    }

    #[test]
    fn test_calm_target_before_emotion() {
        let plan = plan_for(AffectDelta::uniform(50));
        assert_eq!(select_activity(EmotionLabel::Anger, &plan), MicroActivity::QuietBreak);
    }

    #[test]
    fn test_emotion_table() {
        let plan = plan_for(AffectDelta::new(55, 50, 60, 60, 50));
        assert_eq!(select_activity(EmotionLabel::Anger, &plan), MicroActivity::BriskWalk);
        assert_eq!(select_activity(EmotionLabel::Neutral, &plan), MicroActivity::RestEyes);
        assert_eq!(
            select_activity(EmotionLabel::Sadness, &plan).text(),
            "Get a warm drink and take a short writing break."
        );
    }
}
