//! Five-dimensional affect state and its per-layer ledger.
//!
//! # Invariants
//!
//! - Every [`AffectState`] dimension lies in `[AFFECT_MIN, AFFECT_MAX]`.
//! - For every dimension `d`, clamping the sum of all five breakdown layers
//!   yields the state value: `clamp(Σ breakdown[layer][d]) == state[d]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of every affect dimension.
pub const AFFECT_MIN: i32 = 0;

/// Upper bound of every affect dimension.
pub const AFFECT_MAX: i32 = 100;

/// Starting value of every dimension before any layer is applied.
pub const AFFECT_BASE: i32 = 50;

/// Clamp a raw dimension value into `[AFFECT_MIN, AFFECT_MAX]`.
#[inline]
pub fn clamp_affect(value: i32) -> i32 {
    value.clamp(AFFECT_MIN, AFFECT_MAX)
}

/// One axis of the affect state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Valence,
    Arousal,
    PhysicalComfort,
    EnvironmentalCalm,
    EmotionalIntensity,
}

impl Dimension {
    /// All dimensions in their fixed reporting order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Valence,
        Dimension::Arousal,
        Dimension::PhysicalComfort,
        Dimension::EnvironmentalCalm,
        Dimension::EmotionalIntensity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valence => "valence",
            Self::Arousal => "arousal",
            Self::PhysicalComfort => "physical_comfort",
            Self::EnvironmentalCalm => "environmental_calm",
            Self::EmotionalIntensity => "emotional_intensity",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed per-dimension adjustment.
///
/// Used for every breakdown layer (including `base`) and for regulation deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffectDelta {
    pub valence: i32,
    pub arousal: i32,
    pub physical_comfort: i32,
    pub environmental_calm: i32,
    pub emotional_intensity: i32,
}

impl AffectDelta {
    /// All-zero delta.
    pub const ZERO: AffectDelta = AffectDelta::new(0, 0, 0, 0, 0);

    /// Construct from values in [`Dimension::ALL`] order.
    pub const fn new(
        valence: i32,
        arousal: i32,
        physical_comfort: i32,
        environmental_calm: i32,
        emotional_intensity: i32,
    ) -> Self {
        Self {
            valence,
            arousal,
            physical_comfort,
            environmental_calm,
            emotional_intensity,
        }
    }

    /// Same value on every dimension.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn get(&self, dim: Dimension) -> i32 {
        match dim {
            Dimension::Valence => self.valence,
            Dimension::Arousal => self.arousal,
            Dimension::PhysicalComfort => self.physical_comfort,
            Dimension::EnvironmentalCalm => self.environmental_calm,
            Dimension::EmotionalIntensity => self.emotional_intensity,
        }
    }

    pub fn get_mut(&mut self, dim: Dimension) -> &mut i32 {
        match dim {
            Dimension::Valence => &mut self.valence,
            Dimension::Arousal => &mut self.arousal,
            Dimension::PhysicalComfort => &mut self.physical_comfort,
            Dimension::EnvironmentalCalm => &mut self.environmental_calm,
            Dimension::EmotionalIntensity => &mut self.emotional_intensity,
        }
    }

    /// Component-wise sum.
    pub fn plus(&self, other: &AffectDelta) -> AffectDelta {
        let mut out = *self;
        for dim in Dimension::ALL {
            *out.get_mut(dim) += other.get(dim);
        }
        out
    }

    /// Multiply every component by an integer factor.
    pub fn scaled(&self, factor: i32) -> AffectDelta {
        let mut out = *self;
        for dim in Dimension::ALL {
            *out.get_mut(dim) *= factor;
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// The five-dimensional affect state, every dimension in `[0, 100]`.
///
/// Only constructible through [`AffectState::from_raw`] (which clamps) or
/// [`AffectState::neutral`], so the range invariant always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "AffectDelta")]
pub struct AffectState {
    valence: i32,
    arousal: i32,
    physical_comfort: i32,
    environmental_calm: i32,
    emotional_intensity: i32,
}

impl AffectState {
    /// Every dimension at [`AFFECT_BASE`].
    pub fn neutral() -> Self {
        Self::from_raw(AffectDelta::uniform(AFFECT_BASE))
    }

    /// Clamp an unbounded running sum into a valid state.
    pub fn from_raw(raw: AffectDelta) -> Self {
        Self {
            valence: clamp_affect(raw.valence),
            arousal: clamp_affect(raw.arousal),
            physical_comfort: clamp_affect(raw.physical_comfort),
            environmental_calm: clamp_affect(raw.environmental_calm),
            emotional_intensity: clamp_affect(raw.emotional_intensity),
        }
    }

    pub fn valence(&self) -> i32 {
        self.valence
    }

    pub fn arousal(&self) -> i32 {
        self.arousal
    }

    pub fn physical_comfort(&self) -> i32 {
        self.physical_comfort
    }

    pub fn environmental_calm(&self) -> i32 {
        self.environmental_calm
    }

    pub fn emotional_intensity(&self) -> i32 {
        self.emotional_intensity
    }

    pub fn get(&self, dim: Dimension) -> i32 {
        match dim {
            Dimension::Valence => self.valence,
            Dimension::Arousal => self.arousal,
            Dimension::PhysicalComfort => self.physical_comfort,
            Dimension::EnvironmentalCalm => self.environmental_calm,
            Dimension::EmotionalIntensity => self.emotional_intensity,
        }
    }

    /// Values in [`Dimension::ALL`] order.
    pub fn to_array(&self) -> [i32; 5] {
        Dimension::ALL.map(|d| self.get(d))
    }
}

impl From<AffectDelta> for AffectState {
    fn from(raw: AffectDelta) -> Self {
        Self::from_raw(raw)
    }
}

impl Default for AffectState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl fmt::Display for AffectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "valence={} arousal={} comfort={} calm={} intensity={}",
            self.valence,
            self.arousal,
            self.physical_comfort,
            self.environmental_calm,
            self.emotional_intensity
        )
    }
}

/// Named contribution layer in the breakdown ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Base,
    Emotion,
    Event,
    Micro,
    Context,
}

impl Layer {
    /// Layers in application order.
    pub const ALL: [Layer; 5] = [
        Layer::Base,
        Layer::Emotion,
        Layer::Event,
        Layer::Micro,
        Layer::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Emotion => "emotion",
            Self::Event => "event",
            Self::Micro => "micro",
            Self::Context => "context",
        }
    }
}

/// Per-layer ledger of the deltas that produced an [`AffectState`].
///
/// Serializes as `{"base": {...}, "emotion": {...}, ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectBreakdown {
    pub base: AffectDelta,
    pub emotion: AffectDelta,
    pub event: AffectDelta,
    pub micro: AffectDelta,
    pub context: AffectDelta,
}

impl AffectBreakdown {
    pub fn layer(&self, layer: Layer) -> &AffectDelta {
        match layer {
            Layer::Base => &self.base,
            Layer::Emotion => &self.emotion,
            Layer::Event => &self.event,
            Layer::Micro => &self.micro,
            Layer::Context => &self.context,
        }
    }

    /// Layers paired with their deltas, in application order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &AffectDelta)> + '_ {
        Layer::ALL.into_iter().map(move |l| (l, self.layer(l)))
    }

    /// Unclamped sum of all layers.
    pub fn raw_total(&self) -> AffectDelta {
        self.iter()
            .fold(AffectDelta::ZERO, |acc, (_, delta)| acc.plus(delta))
    }

    /// Rebuild the final state from the ledger alone.
    pub fn reconstruct(&self) -> AffectState {
        AffectState::from_raw(self.raw_total())
    }
}
