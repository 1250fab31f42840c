//! Regulation planning: compare a state against a fixed target and describe
//! the corrections a recommendation should aim for.
//!
//! Directives are independent threshold rules evaluated per dimension. They
//! are always emitted in [`Dimension::ALL`] order, so the output order never
//! depends on which rules happened to fire.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{AffectDelta, AffectState, Dimension, Stage, Trace};

/// Minimum absolute delta that triggers a directive.
pub const DIRECTIVE_THRESHOLD: i32 = 10;

/// The state every plan steers toward.
pub const REGULATION_TARGET: AffectDelta = AffectDelta::new(55, 50, 60, 60, 50);

/// A natural-language correction hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    RaiseValence,
    AllowMelancholy,
    RaiseArousal,
    LowerArousal,
    WarmComfort,
    AmbientCalm,
    ReduceIntensity,
    AllowIntensity,
    Balanced,
}

impl Directive {
    pub fn text(&self) -> &'static str {
        match self {
            Self::RaiseValence => "Raise valence: more positive, hopeful tones.",
            Self::AllowMelancholy => "Lower valence: allow a melancholic tone, but not heavy.",
            Self::RaiseArousal => "Raise arousal: slightly higher tempo, rhythmic.",
            Self::LowerArousal => "Lower arousal: low tempo, soft transitions, calm.",
            Self::WarmComfort => {
                "Raise physical comfort: warm, comforting timbres (acoustic/lofi/piano)."
            }
            Self::AmbientCalm => "Raise environmental calm: ambient/lofi, minimal, a safe feeling.",
            Self::ReduceIntensity => "Reduce emotional intensity: non-dramatic, low intensity.",
            Self::AllowIntensity => "Allow emotional intensity: emotional but controlled.",
            Self::Balanced => "Overall balance: medium tempo, calm-positive, non-disruptive choice.",
        }
    }

    /// Directive fired by a single dimension's delta, if any.
    fn for_dimension(dim: Dimension, delta: i32) -> Option<Self> {
        let up = delta >= DIRECTIVE_THRESHOLD;
        let down = delta <= -DIRECTIVE_THRESHOLD;
        match dim {
            Dimension::Valence if up => Some(Self::RaiseValence),
            Dimension::Valence if down => Some(Self::AllowMelancholy),
            Dimension::Arousal if up => Some(Self::RaiseArousal),
            Dimension::Arousal if down => Some(Self::LowerArousal),
            Dimension::PhysicalComfort if up => Some(Self::WarmComfort),
            Dimension::EnvironmentalCalm if up => Some(Self::AmbientCalm),
            Dimension::EmotionalIntensity if down => Some(Self::ReduceIntensity),
            Dimension::EmotionalIntensity if up => Some(Self::AllowIntensity),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Target, per-dimension correction and directives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationPlan {
    pub target: AffectDelta,
    /// `target - current`, per dimension.
    pub delta: AffectDelta,
    pub directives: Vec<Directive>,
}

impl RegulationPlan {
    pub fn directive_texts(&self) -> Vec<&'static str> {
        self.directives.iter().map(Directive::text).collect()
    }

    pub fn has(&self, directive: Directive) -> bool {
        self.directives.contains(&directive)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegulationPlanner {
    target: AffectDelta,
}

impl Default for RegulationPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RegulationPlanner {
    pub fn new() -> Self {
        Self {
            target: REGULATION_TARGET,
        }
    }

    pub fn target(&self) -> AffectDelta {
        self.target
    }

    pub fn plan(&self, current: &AffectState) -> RegulationPlan {
        let mut delta = self.target;
        for dim in Dimension::ALL {
            *delta.get_mut(dim) -= current.get(dim);
        }

        let mut directives: Vec<Directive> = Dimension::ALL
            .into_iter()
            .filter_map(|dim| Directive::for_dimension(dim, delta.get(dim)))
            .collect();
        if directives.is_empty() {
            directives.push(Directive::Balanced);
        }

        RegulationPlan {
            target: self.target,
            delta,
            directives,
        }
    }

    pub fn plan_traced(&self, current: &AffectState, trace: &mut Trace) -> RegulationPlan {
        let plan = self.plan(current);
        trace.push(Stage::Regulation, format!("regulation delta: {:?}", plan.delta));
        for directive in &plan.directives {
            trace.push(Stage::Regulation, format!("directive: {:?}", directive));
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(values: [i32; 5]) -> RegulationPlan {
        let [v, a, p, c, i] = values;
        RegulationPlanner::new().plan(&AffectState::from_raw(AffectDelta::new(v, a, p, c, i)))
    }

    #[test]
    fn test_neutral_state_plan() {
        let p = plan([50, 50, 50, 50, 50]);
        assert_eq!(p.delta, AffectDelta::new(5, 0, 10, 10, 0));
        assert_eq!(p.directives, vec![Directive::WarmComfort, Directive::AmbientCalm]);
    }

    #[test]
    fn test_at_target_is_balanced() {
        let p = plan([55, 50, 60, 60, 50]);
        assert!(p.delta.is_zero());
        assert_eq!(p.directives, vec![Directive::Balanced]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // valence delta exactly -10, arousal delta 9
        let p = plan([65, 41, 60, 60, 50]);
        assert_eq!(p.directives, vec![Directive::AllowMelancholy]);
    }

    #[test]
    fn test_output_follows_dimension_order() {
        let p = plan([20, 90, 10, 10, 95]);
        assert_eq!(
            p.directives,
            vec![
                Directive::RaiseValence,
                Directive::LowerArousal,
                Directive::WarmComfort,
                Directive::AmbientCalm,
                Directive::ReduceIntensity,
            ]
        );
    }

    #[test]
    fn test_comfort_and_calm_have_no_downward_directive() {
        let p = plan([55, 50, 100, 100, 50]);
        assert_eq!(p.delta.physical_comfort, -40);
        assert_eq!(p.directives, vec![Directive::Balanced]);
    }

    #[test]
    fn test_low_intensity_allows_intensity() {
        let p = plan([55, 20, 60, 60, 10]);
        assert_eq!(p.directives, vec![Directive::RaiseArousal, Directive::AllowIntensity]);
        assert!(p.directive_texts()[1].starts_with("Allow emotional intensity"));
    }

    #[test]
    fn test_traced_lists_each_directive() {
        let mut trace = Trace::new();
        let state = AffectState::neutral();
        RegulationPlanner::new().plan_traced(&state, &mut trace);
        assert_eq!(trace.for_stage(Stage::Regulation).count(), 3);
        assert!(trace.contains(Stage::Regulation, "WarmComfort"));
    }

    #[test]
    fn test_plan_serializes_directives_by_name() {
        let json = serde_json::to_value(plan([50, 50, 50, 50, 50])).unwrap();
        assert_eq!(json["directives"][0], "warm_comfort");
        assert_eq!(json["target"]["physical_comfort"], 60);
    }
}
