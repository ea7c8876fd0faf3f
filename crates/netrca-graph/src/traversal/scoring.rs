//! Edge and path scoring.
//!
//! `combine` is a weighted geometric mean of the three edge weight components:
//!
//! ```text
//! edge_score = t^(wt/W) * s^(ws/W) * c^(wc/W),   W = wt + ws + wc
//! ```
//!
//! With every component in [0, 1] the result stays in [0, 1] and never
//! decreases when any component increases. A zero component with a non-zero
//! exponent zeroes the edge. Path score is the product of edge scores
//! (seed = 1.0), so extending a path can never raise its score.

use netrca_core::config::ScoringConfig;
use netrca_core::models::Edge;

/// Normalized exponents for [`EdgeScorer::combine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeScorer {
    topological: f64,
    semantic: f64,
    source_confidence: f64,
}

impl EdgeScorer {
    pub fn from_config(config: &ScoringConfig) -> Self {
        let sum = config.weight_sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Self::equal();
        }
        Self {
            topological: config.topological_weight / sum,
            semantic: config.semantic_weight / sum,
            source_confidence: config.source_confidence_weight / sum,
        }
    }

    fn equal() -> Self {
        Self {
            topological: 1.0 / 3.0,
            semantic: 1.0 / 3.0,
            source_confidence: 1.0 / 3.0,
        }
    }

    pub fn combine(&self, topological: f64, semantic: f64, source_confidence: f64) -> f64 {
        let score = topological.powf(self.topological)
            * semantic.powf(self.semantic)
            * source_confidence.powf(self.source_confidence);
        score.clamp(0.0, 1.0)
    }

    pub fn edge_score(&self, edge: &Edge) -> f64 {
        let w = &edge.weights;
        self.combine(w.topological, w.semantic, w.source_confidence)
    }
}

impl Default for EdgeScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

/// Cumulative score after taking one more edge.
pub fn extend_score(parent: f64, edge_score: f64) -> f64 {
    parent * edge_score
}

/// Score of a path given its per-hop edge scores in order.
pub fn path_score(edge_scores: &[f64]) -> f64 {
    edge_scores.iter().fold(1.0, |acc, &s| extend_score(acc, s))
}
