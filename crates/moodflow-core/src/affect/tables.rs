//! Fixed per-emotion and micro-signal weights.

use crate::types::{AffectDelta, EmotionLabel};

/// Per-dimension weights applied to the micro-signal score.
pub const MICRO_WEIGHTS: AffectDelta = AffectDelta::new(3, 1, 7, 2, -1);

const HAPPINESS: AffectDelta = AffectDelta::new(18, 8, 10, 6, 6);
const SADNESS: AffectDelta = AffectDelta::new(-18, -8, -10, -6, 6);
const FEAR: AffectDelta = AffectDelta::new(-15, 12, -12, -15, 16);
const ANGER: AffectDelta = AffectDelta::new(-12, 16, -10, -12, 18);
const SURPRISE: AffectDelta = AffectDelta::new(2, 10, -2, -4, 12);

/// Emotion layer for a fused label. Neutral contributes nothing.
pub fn emotion_delta(label: EmotionLabel) -> AffectDelta {
    match label {
        EmotionLabel::Happiness => HAPPINESS,
        EmotionLabel::Sadness => SADNESS,
        EmotionLabel::Fear => FEAR,
        EmotionLabel::Anger => ANGER,
        EmotionLabel::Surprise => SURPRISE,
        EmotionLabel::Neutral => AffectDelta::ZERO,
    }
}
