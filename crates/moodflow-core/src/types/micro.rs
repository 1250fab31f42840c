//! Tri-state physiological micro signal (e.g. meal feedback).

use serde::{Deserialize, Serialize};

/// Micro signal reported by the user: negative, absent, or positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroSignal {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl MicroSignal {
    /// Map raw user input. Anything other than `1` or `-1`, including a
    /// missing value, is treated as no signal.
    pub fn from_input(raw: Option<i64>) -> Self {
        match raw {
            Some(1) => Self::Positive,
            Some(-1) => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// Signed score in `{-1, 0, 1}`.
    pub fn score(&self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }
}

impl From<i64> for MicroSignal {
    fn from(raw: i64) -> Self {
        Self::from_input(Some(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micro_mapping() {
        assert_eq!(MicroSignal::from(1).score(), 1);
        assert_eq!(MicroSignal::from(-1).score(), -1);
        assert_eq!(MicroSignal::from(0).score(), 0);
        assert_eq!(MicroSignal::from(2).score(), 0);
        assert_eq!(MicroSignal::from(-7).score(), 0);
        assert_eq!(MicroSignal::from_input(None).score(), 0);
    }
}
