//! Rule pass and fusion for event messages.
//!
//! The rule pass is deterministic and runs first. When its evidence is weak
//! (at most one pressure hit) or the message is long, a generative model may
//! be consulted; [`fuse_event`] then combines both under a fixed order.
//! Calling the model is the caller's job, so this module stays pure.

mod turkish;

use serde::{Deserialize, Serialize};

use crate::text::{normalize, word_count};
use crate::types::{EventSignal, EventType, Stage, Trace};

/// Intensity assigned to a rule-detected energy-up message.
pub const ENERGY_UP_INTENSITY: f64 = 0.6;

/// Pressure intensity before any hits are counted.
pub const PRESSURE_BASE: f64 = 0.3;

/// Added per pressure phrase hit.
pub const PRESSURE_STEP: f64 = 0.1;

/// Ceiling for rule-derived pressure intensity.
pub const PRESSURE_CAP: f64 = 0.9;

/// Floor applied to model-reported intensities.
pub const MODEL_INTENSITY_FLOOR: f64 = 0.4;

/// Intensity used when exactly one pressure phrase matched.
pub const SINGLE_HIT_INTENSITY: f64 = 0.45;

/// Messages longer than this many words always get a model opinion.
pub const LONG_MESSAGE_WORDS: usize = 25;

/// Phrase lists for the rule pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRules {
    pub energy_up_phrases: Vec<String>,
    pub pressure_phrases: Vec<String>,
}

impl EventRules {
    /// The built-in Turkish phrase lists.
    pub fn turkish() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        Self {
            energy_up_phrases: owned(turkish::ENERGY_UP_PHRASES),
            pressure_phrases: owned(turkish::PRESSURE_PHRASES),
        }
    }

    /// Run the rule pass over raw event text.
    pub fn scan(&self, text: Option<&str>) -> RuleScan {
        let text = match text {
            Some(t) if !t.trim().is_empty() => normalize(t),
            _ => return RuleScan::NoText,
        };

        if let Some(phrase) = self
            .energy_up_phrases
            .iter()
            .find(|p| text.contains(p.as_str()))
        {
            return RuleScan::EnergyUp {
                phrase: phrase.clone(),
            };
        }

        let hits = self
            .pressure_phrases
            .iter()
            .filter(|p| text.contains(p.as_str()))
            .cloned()
            .collect();

        RuleScan::Pressure(PressureEvidence {
            hits,
            word_count: word_count(&text),
        })
    }
}

impl Default for EventRules {
    fn default() -> Self {
        Self::turkish()
    }
}

/// Outcome of the rule pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scan", rename_all = "snake_case")]
pub enum RuleScan {
    /// Missing or blank text.
    NoText,
    /// An energy-up phrase matched; this short-circuits everything else.
    EnergyUp { phrase: String },
    /// Pressure phrase hits (possibly none).
    Pressure(PressureEvidence),
}

/// Pressure phrases found in a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureEvidence {
    pub hits: Vec<String>,
    pub word_count: usize,
}

impl PressureEvidence {
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// `min(0.3 + 0.1 * hits, 0.9)`.
    pub fn rule_intensity(&self) -> f64 {
        (PRESSURE_BASE + self.hit_count() as f64 * PRESSURE_STEP).min(PRESSURE_CAP)
    }

    /// Whether the rule evidence is weak enough to ask the model.
    pub fn needs_model_opinion(&self) -> bool {
        self.hit_count() <= 1 || self.word_count > LONG_MESSAGE_WORDS
    }
}

/// A generative model's classification of an event message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelEventOpinion {
    pub event_type: EventType,
    pub intensity: f64,
}

/// Which fusion step decided the event signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRule {
    NoText,
    EnergyUpPhrase,
    RulePressure,
    ModelOpinion,
    SinglePressureHit,
    NoSignal,
}

/// Final event signal plus the deciding step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventDecision {
    pub signal: EventSignal,
    pub rule: EventRule,
}

impl EventDecision {
    fn new(event_type: EventType, intensity: f64, rule: EventRule) -> Self {
        Self {
            signal: EventSignal::new(event_type, intensity),
            rule,
        }
    }

    /// Decision for scans that never reach fusion.
    pub fn from_terminal_scan(scan: &RuleScan) -> Option<Self> {
        match scan {
            RuleScan::NoText => Some(Self::new(EventType::Neutral, 0.0, EventRule::NoText)),
            RuleScan::EnergyUp { .. } => Some(Self::new(
                EventType::EnergyUp,
                ENERGY_UP_INTENSITY,
                EventRule::EnergyUpPhrase,
            )),
            RuleScan::Pressure(_) => None,
        }
    }
}

/// Combine pressure evidence with an optional model opinion.
///
/// 1. Two or more hits ⇒ `(pressure, rule intensity)`
/// 2. Non-neutral model opinion ⇒ `(type, max(intensity, 0.4))`
/// 3. Exactly one hit ⇒ `(pressure, 0.45)`
/// 4. Otherwise ⇒ `(neutral, 0.0)`
pub fn fuse_event(evidence: &PressureEvidence, opinion: Option<ModelEventOpinion>) -> EventDecision {
    if evidence.hit_count() >= 2 {
        return EventDecision::new(
            EventType::Pressure,
            evidence.rule_intensity(),
            EventRule::RulePressure,
        );
    }

    if let Some(op) = opinion.filter(|op| !op.event_type.is_neutral()) {
        let intensity = op.intensity.clamp(0.0, 1.0).max(MODEL_INTENSITY_FLOOR);
        return EventDecision::new(op.event_type, intensity, EventRule::ModelOpinion);
    }

    if evidence.hit_count() == 1 {
        return EventDecision::new(
            EventType::Pressure,
            SINGLE_HIT_INTENSITY,
            EventRule::SinglePressureHit,
        );
    }

    EventDecision::new(EventType::Neutral, 0.0, EventRule::NoSignal)
}

/// Trace a finished event decision.
pub fn trace_decision(decision: &EventDecision, trace: &mut Trace) {
    trace.push(
        Stage::Event,
        format!(
            "event -> {} intensity={:.2} ({:?})",
            decision.signal.event_type,
            decision.signal.intensity(),
            decision.rule
        ),
    );
}
