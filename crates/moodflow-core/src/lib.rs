//! MoodFlow Core Library
//!
//! Deterministic heart of the MoodFlow pipeline: turning classifier opinions,
//! an event signal, a micro signal and ambient context into an affect state,
//! then planning how a recommendation should regulate it.
//!
//! # Architecture
//!
//! ```text
//! text ─► lexicon ─┐
//!   (statistical) ─┼─► fusion ─► label ─┐
//!   (generative)  ─┘                    │
//! event text ─► event rules (+model) ───┼─► affect ─► regulation ─► activity
//! micro input ─► micro signal ──────────┤
//! context snapshot ─────────────────────┘
//! ```
//!
//! Everything here is pure and synchronous. Network collaborators (the
//! statistical and generative models, weather and music lookups) live in
//! `moodflow-agent`.
//!
//! # Example
//!
//! ```
//! use moodflow_core::affect::{AffectInputs, AffectVectorCalculator};
//! use moodflow_core::regulation::{Directive, RegulationPlanner};
//! use moodflow_core::types::{
//!     ContextSnapshot, DayType, EmotionLabel, EventSignal, MicroSignal, TimeOfDay,
//!     WeatherCategory,
//! };
//!
//! let output = AffectVectorCalculator::new().calculate(&AffectInputs {
//!     emotion: EmotionLabel::Neutral,
//!     event: EventSignal::none(),
//!     micro: MicroSignal::Neutral,
//!     context: ContextSnapshot {
//!         city: "Bursa".into(),
//!         weather: WeatherCategory::Clear,
//!         temperature_c: 12.0,
//!         is_dark: false,
//!         time_of_day: TimeOfDay::Day,
//!         day_type: DayType::Weekend,
//!     },
//! });
//! assert_eq!(output.state.to_array(), [50, 50, 50, 50, 50]);
//!
//! let plan = RegulationPlanner::new().plan(&output.state);
//! assert_eq!(plan.directives, vec![Directive::WarmComfort, Directive::AmbientCalm]);
//! ```

pub mod activity;
pub mod affect;
pub mod config;
pub mod error;
pub mod event;
pub mod fusion;
pub mod lexicon;
pub mod regulation;
pub mod text;
pub mod types;

// Re-exports for convenience
pub use activity::{select_activity, MicroActivity};
pub use affect::{AffectInputs, AffectOutput, AffectVectorCalculator};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use fusion::{FusionDecision, FusionInputs, FusionRule};
pub use lexicon::{LexiconClassifier, LexiconVerdict};
pub use regulation::{Directive, RegulationPlan, RegulationPlanner};
pub use types::{
    AffectBreakdown, AffectDelta, AffectState, ContextSnapshot, EmotionLabel, EventSignal,
    EventType, MicroSignal, Trace,
};
