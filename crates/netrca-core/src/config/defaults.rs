// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_TOPOLOGICAL_WEIGHT: f64 = 0.25;
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.35;
pub const DEFAULT_SOURCE_CONFIDENCE_WEIGHT: f64 = 0.40;
/// Semantic weight of an edge the embedding collaborator has not scored yet.
pub const DEFAULT_UNSCORED_SEMANTIC: f64 = 1.0;
/// Topological weight of a directly asserted relationship.
pub const DEFAULT_DIRECT_TOPOLOGICAL: f64 = 1.0;

// --- Traversal ---
pub const DEFAULT_MAX_HOPS: usize = 5;
pub const DEFAULT_MAX_PATHS: usize = 5;
pub const DEFAULT_MIN_EDGE_SCORE: f64 = 0.0;
pub const DEFAULT_EXHAUSTIVE: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_OUTPUT: bool = false;
