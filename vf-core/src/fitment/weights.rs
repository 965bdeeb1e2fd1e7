//! Fitment scoring weights
//!
//! The defaults encode the make > model > year > engine > trim ordering.
//! Sites can retune them through settings once validated against their own
//! catalog data.

use serde::{Deserialize, Serialize};

use crate::constants::scoring;

/// Points awarded per criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Awarded once the make matches
    pub base: u8,
    pub model_exact: u8,
    pub model_any: u8,
    pub year_in_range: u8,
    /// Year outside the range by at most `year_tolerance`
    pub year_near_range: u8,
    pub engine_exact: u8,
    /// Engine wildcard, or engine unknown on either side
    pub engine_any: u8,
    pub engine_mismatch_penalty: u8,
    pub year_tolerance: u16,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: scoring::BASE,
            model_exact: scoring::MODEL_EXACT,
            model_any: scoring::MODEL_ANY,
            year_in_range: scoring::YEAR_IN_RANGE,
            year_near_range: scoring::YEAR_NEAR_RANGE,
            engine_exact: scoring::ENGINE_EXACT,
            engine_any: scoring::ENGINE_ANY,
            engine_mismatch_penalty: scoring::ENGINE_MISMATCH_PENALTY,
            year_tolerance: scoring::YEAR_TOLERANCE,
        }
    }
}

impl ScoringWeights {
    /// Score of a rule that matches every criterion exactly, before trim fill
    pub fn exact_total(&self) -> u16 {
        self.base as u16 + self.model_exact as u16 + self.year_in_range as u16 + self.engine_exact as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exact_total_is_max() {
        assert_eq!(ScoringWeights::default().exact_total(), 100);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let w: ScoringWeights = serde_json::from_str(r#"{"engine_mismatch_penalty": 20}"#).unwrap();
        assert_eq!(w.engine_mismatch_penalty, 20);
        assert_eq!(w.base, 40);
        assert_eq!(w.year_tolerance, 1);
    }
}
