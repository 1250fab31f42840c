//! Domain types shared by every pipeline stage.

mod affect;
mod context;
mod emotion;
mod event;
mod micro;
mod trace;

pub use affect::{
    clamp_affect, AffectBreakdown, AffectDelta, AffectState, Dimension, Layer, AFFECT_BASE,
    AFFECT_MAX, AFFECT_MIN,
};
pub use context::{
    ContextSnapshot, DayType, TimeOfDay, WeatherCategory, WeatherReport, FALLBACK_TEMPERATURE_C,
};
pub use emotion::{EmotionLabel, Polarity};
pub use event::{EventSignal, EventType};
pub use micro::MicroSignal;
pub use trace::{Stage, Trace, TraceEntry};
