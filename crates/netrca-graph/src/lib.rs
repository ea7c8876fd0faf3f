//! # netrca-graph
//!
//! The reasoning engine. Canonical entity registry over an in-memory
//! multigraph (`petgraph`), a single-writer ingestion batch that freezes into
//! shareable snapshots, weighted best-first causal path search, and path
//! explanation.

pub mod explain;
pub mod ingest;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod traversal;

pub use explain::{ConfidenceLevel, ExplainedStep, PathExplainer, PathExplanation};
pub use ingest::{EntityMention, IngestBatch, RelationshipTuple};
pub use registry::EntityRegistry;
pub use snapshot::GraphSnapshot;
pub use store::{Direction, GraphStats, GraphStore};
pub use traversal::{
    Cancellable, CancellationToken, CausalPath, Deadline, PathHop, Termination, TraversalEngine,
    TraversalOutcome, TraversalQuery,
};
