//! Frozen, shareable view of a committed ingestion batch.
//!
//! A snapshot only hands out shared references, so any number of traversals
//! may read it concurrently without locks. Cloning is an `Arc` bump.

pub mod persist;

use std::path::Path;
use std::sync::Arc;

use netrca_core::config::RegistryConfig;
use netrca_core::models::{Edge, EdgeId, EntityType, Node, NodeId};
use netrca_core::{RcaResult, SnapshotError};

use crate::registry::EntityRegistry;
use crate::store::{GraphStats, GraphStore};

#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    store: Arc<GraphStore>,
    registry: Arc<EntityRegistry>,
}

impl GraphSnapshot {
    pub(crate) fn new(store: GraphStore, registry: EntityRegistry) -> Self {
        Self {
            store: Arc::new(store),
            registry: Arc::new(registry),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Resolve an alarm entity to its node without mutating anything.
    pub fn lookup(&self, entity_type: EntityType, name: &str) -> Option<NodeId> {
        self.registry.lookup(entity_type, name)
    }

    pub fn lookup_by_name(&self, entity_type: &str, name: &str) -> Option<NodeId> {
        self.registry.lookup_by_name(entity_type, name)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.store.get_node(id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.store.get_edge(id)
    }

    pub fn stats(&self) -> GraphStats {
        self.store.stats()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        persist::to_json(self)
    }

    pub fn from_json(json: &str, config: RegistryConfig) -> RcaResult<Self> {
        persist::from_json(json, config)
    }

    pub fn save(&self, path: &Path) -> RcaResult<()> {
        persist::save(self, path)
    }

    pub fn load(path: &Path, config: RegistryConfig) -> RcaResult<Self> {
        persist::load(path, config)
    }
}
