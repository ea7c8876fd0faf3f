//! Error taxonomy. Subsystem enums are aggregated into [`RcaError`].
//!
//! Lookup misses are `Option::None` and traversal outcomes are ordinary
//! values; neither appears here.

mod graph_error;
mod registry_error;
mod snapshot_error;

pub use graph_error::GraphError;
pub use registry_error::RegistryError;
pub use snapshot_error::SnapshotError;

/// Top-level error for every fallible netrca operation.
#[derive(Debug, thiserror::Error)]
pub enum RcaError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("ingestion batch aborted: {reason}")]
    BatchAborted { reason: String },

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

pub type RcaResult<T> = Result<T, RcaError>;
