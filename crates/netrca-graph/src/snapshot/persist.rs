//! JSON persistence of committed snapshots.
//!
//! The document carries a node table, an edge table, a format version, and a
//! blake3 checksum of the serialized tables. Loading replays every row
//! through the store's integrity checks and rebuilds the registry.

use std::path::Path;

use netrca_core::config::RegistryConfig;
use netrca_core::constants::SNAPSHOT_FORMAT_VERSION;
use netrca_core::models::{Edge, Node};
use netrca_core::{RcaResult, SnapshotError};
use serde::{Deserialize, Serialize};

use super::GraphSnapshot;
use crate::registry::EntityRegistry;
use crate::store::GraphStore;

/// On-disk representation of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub format_version: u32,
    /// blake3 hex digest of `[nodes, edges]` serialized as compact JSON.
    pub checksum: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl SnapshotFile {
    /// Capture the tables of `store`, ordered by id.
    pub fn from_store(store: &GraphStore) -> Result<Self, SnapshotError> {
        let nodes: Vec<Node> = store.nodes().into_iter().cloned().collect();
        let edges: Vec<Edge> = store.edges().into_iter().cloned().collect();
        let checksum = checksum(&nodes, &edges)?;
        Ok(Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            checksum,
            nodes,
            edges,
        })
    }

    /// Check version and checksum.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.format_version,
                supported: SNAPSHOT_FORMAT_VERSION,
            });
        }
        let actual = checksum(&self.nodes, &self.edges)?;
        if actual != self.checksum {
            return Err(SnapshotError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Rebuild a frozen snapshot, re-validating every node and edge.
    pub fn into_snapshot(self, config: RegistryConfig) -> RcaResult<GraphSnapshot> {
        self.verify()?;
        let mut store = GraphStore::new();
        for node in self.nodes {
            store.add_node(node)?;
        }
        for edge in self.edges {
            store.add_edge(edge)?;
        }
        let registry = EntityRegistry::for_store(&store, config)?;
        Ok(GraphSnapshot::new(store, registry))
    }
}

fn checksum(nodes: &[Node], edges: &[Edge]) -> Result<String, SnapshotError> {
    let bytes = serde_json::to_vec(&(nodes, edges)).map_err(serialization_error)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

fn serialization_error(e: serde_json::Error) -> SnapshotError {
    SnapshotError::Serialization {
        reason: e.to_string(),
    }
}

/// Serialize a snapshot to pretty JSON.
pub fn to_json(snapshot: &GraphSnapshot) -> Result<String, SnapshotError> {
    let file = SnapshotFile::from_store(snapshot.store())?;
    serde_json::to_string_pretty(&file).map_err(serialization_error)
}

/// Parse, verify, and rebuild a snapshot from JSON.
pub fn from_json(json: &str, config: RegistryConfig) -> RcaResult<GraphSnapshot> {
    let file: SnapshotFile = serde_json::from_str(json).map_err(serialization_error)?;
    file.into_snapshot(config)
}

pub fn save(snapshot: &GraphSnapshot, path: &Path) -> RcaResult<()> {
    let json = to_json(snapshot)?;
    std::fs::write(path, json).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!(
        path = %path.display(),
        nodes = snapshot.store().node_count(),
        edges = snapshot.store().edge_count(),
        "snapshot saved"
    );
    Ok(())
}

pub fn load(path: &Path, config: RegistryConfig) -> RcaResult<GraphSnapshot> {
    let json = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let snapshot = from_json(&json, config)?;
    tracing::info!(
        path = %path.display(),
        nodes = snapshot.store().node_count(),
        edges = snapshot.store().edge_count(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
