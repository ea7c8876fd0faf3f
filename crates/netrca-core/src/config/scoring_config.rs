use serde::{Deserialize, Serialize};

use super::defaults;

/// Edge scoring configuration: exponents of the weighted geometric mean
/// and the fallback component values used during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub topological_weight: f64,
    pub semantic_weight: f64,
    pub source_confidence_weight: f64,
    /// Semantic component assigned to new edges until a similarity score arrives.
    pub default_semantic_weight: f64,
    /// Topological component assigned when a relationship tuple carries none.
    pub default_topological_weight: f64,
}

impl ScoringConfig {
    pub fn weight_sum(&self) -> f64 {
        self.topological_weight + self.semantic_weight + self.source_confidence_weight
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            topological_weight: defaults::DEFAULT_TOPOLOGICAL_WEIGHT,
            semantic_weight: defaults::DEFAULT_SEMANTIC_WEIGHT,
            source_confidence_weight: defaults::DEFAULT_SOURCE_CONFIDENCE_WEIGHT,
            default_semantic_weight: defaults::DEFAULT_UNSCORED_SEMANTIC,
            default_topological_weight: defaults::DEFAULT_DIRECT_TOPOLOGICAL,
        }
    }
}
