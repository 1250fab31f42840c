//! Discrete emotion labels and classifier polarity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of emotion labels produced by the pipeline.
///
/// Declaration order matters: the lexicon classifier breaks score ties in
/// favor of the label declared first (see [`EmotionLabel::ALL`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Happiness,
    Sadness,
    Anger,
    Fear,
    Surprise,
    #[default]
    Neutral,
}

impl EmotionLabel {
    /// All labels in declaration order.
    pub const ALL: [EmotionLabel; 6] = [
        EmotionLabel::Happiness,
        EmotionLabel::Sadness,
        EmotionLabel::Anger,
        EmotionLabel::Fear,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happiness => "happiness",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
        }
    }

    /// Parse a label produced by a model.
    ///
    /// Accepts the canonical English names and the Turkish names used by the
    /// built-in lexicon. Matching is case-insensitive and ignores surrounding
    /// whitespace. Returns `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "happiness" | "mutluluk" => Some(Self::Happiness),
            "sadness" | "hüzün" => Some(Self::Sadness),
            "anger" | "öfke" => Some(Self::Anger),
            "fear" | "korku" => Some(Self::Fear),
            "surprise" | "şaşkınlık" => Some(Self::Surprise),
            "neutral" | "nötr" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Whether this label carries any affect at all.
    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way output of the statistical sentiment model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Polarity {
    /// Interpret a raw model label such as `"LABEL_1"`, `"positive"` or
    /// `"Negative"`. Anything not containing `positive`/`negative` is neutral.
    pub fn from_model_label(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("positive") {
            Self::Positive
        } else if lower.contains("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Coarse mapping onto the emotion label set.
    ///
    /// The statistical signal can never produce anger, fear or surprise.
    pub fn to_emotion(self) -> EmotionLabel {
        match self {
            Self::Positive => EmotionLabel::Happiness,
            Self::Negative => EmotionLabel::Sadness,
            Self::Neutral => EmotionLabel::Neutral,
        }
    }
}
