//! Affect vector composition.
//!
//! Every dimension starts at [`AFFECT_BASE`]. Four additive layers are then
//! applied in order (emotion, event, micro, context), each recorded verbatim
//! in an [`AffectBreakdown`] before being summed. The final state is the
//! per-dimension sum clamped to `[0, 100]`, so the breakdown alone is enough
//! to reconstruct it.

mod tables;

pub use tables::{emotion_delta, MICRO_WEIGHTS};

use serde::{Deserialize, Serialize};

use crate::types::{
    AffectBreakdown, AffectDelta, AffectState, ContextSnapshot, DayType, EmotionLabel,
    EventSignal, EventType, MicroSignal, Stage, Trace, AFFECT_BASE,
};

/// Effective intensity floor for energy-up events.
pub const ENERGY_UP_FLOOR: f64 = 0.3;

/// Effective intensity floor for pressure and energy-down events.
pub const PRESSURE_FLOOR: f64 = 0.4;

/// Below this temperature the cold adjustment applies.
pub const COLD_BELOW_C: f64 = 5.0;

/// Below this temperature (and at or above [`COLD_BELOW_C`]) the chilly adjustment applies.
pub const CHILLY_BELOW_C: f64 = 10.0;

/// Inputs to the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectInputs {
    pub emotion: EmotionLabel,
    pub event: EventSignal,
    pub micro: MicroSignal,
    pub context: ContextSnapshot,
}

/// Calculator result: the clamped state and its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectOutput {
    pub state: AffectState,
    pub breakdown: AffectBreakdown,
}

/// Composes affect states from classifier outputs and context.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffectVectorCalculator;

impl AffectVectorCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, inputs: &AffectInputs) -> AffectOutput {
        let breakdown = AffectBreakdown {
            base: AffectDelta::uniform(AFFECT_BASE),
            emotion: emotion_delta(inputs.emotion),
            event: event_delta(&inputs.event),
            micro: micro_delta(inputs.micro),
            context: context_delta(&inputs.context),
        };

        AffectOutput {
            state: AffectState::from_raw(breakdown.raw_total()),
            breakdown,
        }
    }

    /// [`calculate`](Self::calculate) plus one trace line per non-zero layer.
    pub fn calculate_traced(&self, inputs: &AffectInputs, trace: &mut Trace) -> AffectOutput {
        let output = self.calculate(inputs);
        for (layer, delta) in output.breakdown.iter().skip(1) {
            if !delta.is_zero() {
                trace.push(Stage::Affect, format!("{} layer: {:?}", layer.as_str(), delta));
            }
        }
        trace.push(Stage::Affect, format!("affect state: {}", output.state));
        output
    }
}

/// Event layer. Deltas are truncated toward zero.
pub fn event_delta(event: &EventSignal) -> AffectDelta {
    let it = event.intensity().clamp(0.0, 1.0);
    let scaled = |weight: f64, eff: f64| (weight * eff) as i32;

    match event.event_type {
        EventType::EnergyUp => {
            let eff = it.max(ENERGY_UP_FLOOR);
            AffectDelta {
                valence: scaled(10.0, eff),
                arousal: scaled(6.0, eff),
                emotional_intensity: scaled(4.0, eff),
                ..AffectDelta::ZERO
            }
        }
        EventType::Pressure | EventType::EnergyDown => {
            let eff = it.max(PRESSURE_FLOOR);
            AffectDelta::new(
                scaled(-10.0, eff),
                scaled(8.0, eff),
                scaled(-10.0, eff),
                scaled(-14.0, eff),
                scaled(10.0, eff),
            )
        }
        EventType::Neutral => AffectDelta::ZERO,
    }
}

/// Micro-signal layer: fixed per-dimension weights times the score.
pub fn micro_delta(micro: MicroSignal) -> AffectDelta {
    MICRO_WEIGHTS.scaled(micro.score())
}

/// Context layer. Darkness, temperature and weekday effects are independent
/// and additive.
pub fn context_delta(context: &ContextSnapshot) -> AffectDelta {
    let mut delta = AffectDelta::ZERO;

    if context.is_dark {
        delta.arousal -= 3;
        delta.physical_comfort -= 2;
        delta.environmental_calm += 2;
    }

    let temp = context.temperature_c;
    if temp < COLD_BELOW_C {
        delta.physical_comfort -= 5;
        delta.environmental_calm -= 2;
    } else if temp < CHILLY_BELOW_C {
        delta.physical_comfort -= 3;
        delta.environmental_calm -= 1;
    }

    if context.day_type == DayType::Weekday {
        delta.environmental_calm -= 2;
        delta.emotional_intensity += 2;
    }

    delta
}
