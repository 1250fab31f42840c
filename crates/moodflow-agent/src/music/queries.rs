//! Search-query candidates and artist-language detection.

use moodflow_core::regulation::{RegulationPlan, DIRECTIVE_THRESHOLD};
use moodflow_core::types::EmotionLabel;

/// Query used when nothing else applies.
pub const DEFAULT_QUERY: &str = "chill instrumental";

/// Letters that mark an artist name as Turkish.
const LOCAL_LETTERS: &[char] = &['ç', 'ğ', 'ı', 'ö', 'ş', 'ü', 'Ç', 'Ğ', 'İ', 'Ö', 'Ş', 'Ü'];

fn emotion_hint(label: EmotionLabel) -> &'static [&'static str] {
    match label {
        EmotionLabel::Happiness => &["warm chill", "positive calm"],
        EmotionLabel::Sadness => &["soft acoustic", "calm piano"],
        EmotionLabel::Anger => &["calm lofi"],
        EmotionLabel::Fear => &["safe ambient"],
        EmotionLabel::Surprise | EmotionLabel::Neutral => &[DEFAULT_QUERY],
    }
}

/// Candidate queries: a weak emotion hint followed by the regulation
/// direction. Duplicates are kept so repeated themes weigh more.
pub fn candidate_queries(label: EmotionLabel, plan: &RegulationPlan) -> Vec<&'static str> {
    let d = &plan.delta;
    let t = DIRECTIVE_THRESHOLD;
    let mut queries: Vec<&'static str> = emotion_hint(label).to_vec();

    if d.arousal <= -t {
        queries.extend(["slow ambient", "low tempo", "calm lofi"]);
    }
    if d.arousal >= t {
        queries.extend(["uplifting pop", "energetic indie"]);
    }
    if d.physical_comfort >= t {
        queries.extend(["soft piano", "warm acoustic"]);
    }
    if d.environmental_calm >= t {
        queries.extend(["peaceful ambient", "minimal ambient"]);
    }
    if d.emotional_intensity <= -t {
        queries.push("low intensity instrumental");
    }
    if d.emotional_intensity >= t {
        queries.extend(["emotional indie", "cinematic instrumental"]);
    }
    if d.valence >= t {
        queries.push("feel good chill");
    }
    if d.valence <= -t {
        queries.extend(["melancholic indie", "soft sad songs"]);
    }

    queries
}

pub fn is_local_artist(name: &str) -> bool {
    name.chars().any(|c| LOCAL_LETTERS.contains(&c))
}
