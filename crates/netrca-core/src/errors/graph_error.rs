use crate::models::{EdgeId, NodeId};

/// Graph store errors. Duplicate ids, dangling references and missing
/// canonical names are integrity violations that abort the ingesting batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: NodeId },

    #[error("duplicate edge id: {id}")]
    DuplicateEdgeId { id: EdgeId },

    #[error("edge {edge} references missing node {missing}")]
    DanglingReference { edge: EdgeId, missing: NodeId },

    #[error("invalid {component} weight: {value} (must be within [0, 1])")]
    InvalidWeight { component: &'static str, value: f64 },

    #[error("invalid property '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },

    #[error("node {id} has no text canonical_name property")]
    MissingCanonicalName { id: NodeId },

    #[error("unknown relationship label: {label}")]
    InvalidRelation { label: String },

    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("edge not found: {id}")]
    EdgeNotFound { id: EdgeId },

    #[error("path has no nodes")]
    EmptyPath,
}
