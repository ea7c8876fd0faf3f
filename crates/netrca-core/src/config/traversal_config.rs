use serde::{Deserialize, Serialize};

use super::defaults;

/// Default limits for causal path search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Maximum number of edges in a returned path.
    pub max_hops: usize,
    /// Maximum number of paths returned per query.
    pub max_paths: usize,
    /// Edges scoring below this are never followed.
    pub min_edge_score: f64,
    /// Enumerate every simple path instead of keeping one best path per node.
    pub exhaustive: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_hops: defaults::DEFAULT_MAX_HOPS,
            max_paths: defaults::DEFAULT_MAX_PATHS,
            min_edge_score: defaults::DEFAULT_MIN_EDGE_SCORE,
            exhaustive: defaults::DEFAULT_EXHAUSTIVE,
        }
    }
}
