//! Event signal: the category and strength of an incoming message's impact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Impact category of an event message on the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Praise, invitations, good news.
    EnergyUp,
    /// Criticism, revision requests, workload, deadlines.
    Pressure,
    /// Negative news.
    EnergyDown,
    /// Informational, or no event at all.
    #[default]
    Neutral,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::EnergyUp,
        EventType::Pressure,
        EventType::EnergyDown,
        EventType::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnergyUp => "energy_up",
            Self::Pressure => "pressure",
            Self::EnergyDown => "energy_down",
            Self::Neutral => "neutral",
        }
    }

    /// Parse a category name produced by a model.
    ///
    /// `stress` is accepted as a synonym for `pressure`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "energy_up" => Some(Self::EnergyUp),
            "pressure" | "stress" => Some(Self::Pressure),
            "energy_down" => Some(Self::EnergyDown),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified event: category plus intensity in `[0.0, 1.0]`.
///
/// Deserialization goes through [`EventSignal::new`], so the range holds for
/// decoded values too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEventSignal")]
pub struct EventSignal {
    pub event_type: EventType,
    intensity: f64,
}

#[derive(Deserialize)]
struct RawEventSignal {
    event_type: EventType,
    intensity: f64,
}

impl From<RawEventSignal> for EventSignal {
    fn from(raw: RawEventSignal) -> Self {
        Self::new(raw.event_type, raw.intensity)
    }
}

impl EventSignal {
    /// Build a signal, clamping `intensity` into `[0.0, 1.0]`.
    ///
    /// NaN intensities collapse to `0.0`.
    pub fn new(event_type: EventType, intensity: f64) -> Self {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        Self {
            event_type,
            intensity,
        }
    }

    /// The "no event" signal.
    pub fn none() -> Self {
        Self::new(EventType::Neutral, 0.0)
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl Default for EventSignal {
    fn default() -> Self {
        Self::none()
    }
}
