//! Canonical entity registry (record linkage).
//!
//! Maps `(entity type, normalized name)` to a stable [`NodeId`] so every
//! real-world concept gets exactly one node. Names must already be normalized
//! by the upstream normalization stage; the registry compares them verbatim.
//!
//! A registry is created per ingestion batch and owns its id counter. Once the
//! batch commits it is frozen inside a [`crate::GraphSnapshot`] and only
//! [`EntityRegistry::lookup`] remains reachable.

use std::collections::HashMap;

use netrca_core::config::RegistryConfig;
use netrca_core::constants::FIRST_NODE_ID;
use netrca_core::models::{EntityType, Node, NodeId};
use netrca_core::{RcaResult, RegistryError};

use crate::store::GraphStore;

/// Registry key: entity type plus normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryKey {
    pub entity_type: EntityType,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    config: RegistryConfig,
    entries: HashMap<RegistryKey, NodeId>,
    next_id: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            next_id: FIRST_NODE_ID,
        }
    }

    /// Rebuild the mapping from the nodes already present in `store`.
    /// The id counter resumes after the highest existing node id.
    pub fn for_store(store: &GraphStore, config: RegistryConfig) -> RcaResult<Self> {
        let mut registry = Self::with_config(config);
        for node in store.nodes() {
            let name = node.canonical_name().unwrap_or_default().to_string();
            let key = RegistryKey {
                entity_type: node.entity_type,
                name,
            };
            if registry.entries.contains_key(&key) {
                return Err(RegistryError::DuplicateCanonicalEntity {
                    entity_type: key.entity_type.to_string(),
                    name: key.name,
                }
                .into());
            }
            registry.entries.insert(key, node.id);
        }
        if let Some(max) = store.max_node_id() {
            registry.next_id = registry.next_id.max(max.0 + 1);
        }
        Ok(registry)
    }

    /// Parse an entity type name and check it against the configured allow-list.
    pub fn parse_type(&self, entity_type: &str) -> Result<EntityType, RegistryError> {
        EntityType::from_str_name(entity_type)
            .filter(|t| self.config.allows(*t))
            .ok_or_else(|| RegistryError::InvalidEntityType {
                type_name: entity_type.to_string(),
            })
    }

    /// Resolve a mention to its canonical node, creating the node on first sight.
    ///
    /// Idempotent: a known `(entity_type, raw_name)` returns the existing id
    /// without touching the store. An unknown entity type is rejected before
    /// any mutation.
    pub fn resolve(
        &mut self,
        store: &mut GraphStore,
        entity_type: &str,
        raw_name: &str,
    ) -> RcaResult<NodeId> {
        let entity_type = self.parse_type(entity_type)?;
        self.resolve_typed(store, entity_type, raw_name)
    }

    pub fn resolve_typed(
        &mut self,
        store: &mut GraphStore,
        entity_type: EntityType,
        name: &str,
    ) -> RcaResult<NodeId> {
        if !self.config.allows(entity_type) {
            return Err(RegistryError::InvalidEntityType {
                type_name: entity_type.to_string(),
            }
            .into());
        }
        let key = RegistryKey {
            entity_type,
            name: name.to_string(),
        };
        if let Some(&id) = self.entries.get(&key) {
            return Ok(id);
        }

        let id = NodeId(self.next_id);
        store.add_node(Node::new(id, entity_type, name))?;
        self.next_id += 1;
        self.entries.insert(key, id);
        tracing::debug!(node = %id, %entity_type, name, "canonical entity created");
        Ok(id)
    }

    /// Read-only resolution; `None` if the entity was never registered.
    pub fn lookup(&self, entity_type: EntityType, name: &str) -> Option<NodeId> {
        self.entries
            .get(&RegistryKey {
                entity_type,
                name: name.to_string(),
            })
            .copied()
    }

    /// Like [`Self::lookup`], parsing the entity type name first.
    pub fn lookup_by_name(&self, entity_type: &str, name: &str) -> Option<NodeId> {
        EntityType::from_str_name(entity_type).and_then(|t| self.lookup(t, name))
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
