//! Append-only decision trace.
//!
//! Every pipeline stage returns its own [`Trace`] next to its result instead of
//! writing into shared state, so concurrent requests never interleave entries.
//! Each push is also mirrored to `tracing` at debug level.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pipeline stage that produced a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Guard,
    Statistical,
    Lexicon,
    Generative,
    Fusion,
    Event,
    Micro,
    Context,
    Affect,
    Regulation,
    Recommendation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guard => "guard",
            Self::Statistical => "statistical",
            Self::Lexicon => "lexicon",
            Self::Generative => "generative",
            Self::Fusion => "fusion",
            Self::Event => "event",
            Self::Micro => "micro",
            Self::Context => "context",
            Self::Affect => "affect",
            Self::Regulation => "regulation",
            Self::Recommendation => "recommendation",
        }
    }
}

/// Single trace line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub stage: Stage,
    pub message: String,
}

/// Ordered, append-only list of trace entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Stage, message: impl Into<String>) {
        let message = message.into();
        debug!(stage = stage.as_str(), "{}", message);
        self.entries.push(TraceEntry { stage, message });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries emitted by one stage.
    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &TraceEntry> + '_ {
        self.entries.iter().filter(move |e| e.stage == stage)
    }

    /// Whether any entry of `stage` contains `needle`.
    pub fn contains(&self, stage: Stage, needle: &str) -> bool {
        self.for_stage(stage).any(|e| e.message.contains(needle))
    }
}
