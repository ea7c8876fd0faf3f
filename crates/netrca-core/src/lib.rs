//! # netrca-core
//!
//! Foundation crate for the netrca reasoning engine.
//! Defines the graph model types, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;

// Re-export the most commonly used types at the crate root.
pub use config::RcaConfig;
pub use errors::{GraphError, RcaError, RcaResult, RegistryError, SnapshotError};
pub use models::{
    Edge, EdgeEvidence, EdgeId, EdgeWeights, EntityType, Node, NodeId, Properties, PropertyValue,
    Relation,
};
