/// netrca version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Property key every node must carry.
pub const CANONICAL_NAME_KEY: &str = "canonical_name";

/// Property key holding how many times an entity was mentioned during ingestion.
pub const MENTIONS_KEY: &str = "mentions";

/// Hard upper bound on `max_hops` for any traversal.
pub const MAX_HOPS_LIMIT: usize = 32;

/// Version written into persisted snapshots.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// First id handed out by a fresh registry.
pub const FIRST_NODE_ID: u64 = 1;

/// Lowest path score reported as high confidence.
pub const HIGH_CONFIDENCE_FLOOR: f64 = 0.8;

/// Lowest path score reported as medium confidence.
pub const MEDIUM_CONFIDENCE_FLOOR: f64 = 0.5;

/// Lowest path score reported as low confidence. Anything below is very low.
pub const LOW_CONFIDENCE_FLOOR: f64 = 0.3;
