use serde::{Deserialize, Serialize};

use crate::models::EntityType;

/// Entity registry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Entity types this registry accepts. Empty means the full enumeration.
    pub allowed_entity_types: Vec<EntityType>,
}

impl RegistryConfig {
    pub fn allows(&self, entity_type: EntityType) -> bool {
        self.allowed_entity_types.is_empty() || self.allowed_entity_types.contains(&entity_type)
    }
}
