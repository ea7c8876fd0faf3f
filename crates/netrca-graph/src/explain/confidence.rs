//! Confidence bands for aggregate path scores.

use std::fmt;

use netrca_core::constants::{
    HIGH_CONFIDENCE_FLOOR, LOW_CONFIDENCE_FLOOR, MEDIUM_CONFIDENCE_FLOOR,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

/// Banded levels, strongest first, with the score each one starts at.
const BANDS: [(ConfidenceLevel, f64); 3] = [
    (ConfidenceLevel::High, HIGH_CONFIDENCE_FLOOR),
    (ConfidenceLevel::Medium, MEDIUM_CONFIDENCE_FLOOR),
    (ConfidenceLevel::Low, LOW_CONFIDENCE_FLOOR),
];

impl ConfidenceLevel {
    /// The strongest band whose floor the score reaches. NaN lands in `VeryLow`.
    pub fn from_score(score: f64) -> Self {
        BANDS
            .iter()
            .find(|(_, floor)| score >= *floor)
            .map_or(Self::VeryLow, |(level, _)| *level)
    }

    /// Lowest score that still maps to this level.
    pub fn floor(self) -> f64 {
        BANDS
            .iter()
            .find(|(level, _)| *level == self)
            .map_or(0.0, |(_, floor)| *floor)
    }

    /// Wording used in explanation summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
