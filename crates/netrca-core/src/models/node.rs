use serde::{Deserialize, Serialize};

use super::{EntityType, NodeId, Properties, PropertyValue};
use crate::constants::CANONICAL_NAME_KEY;
use crate::errors::GraphError;

/// A vertex in the knowledge graph: one canonical networking entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub entity_type: EntityType,
    pub properties: Properties,
}

impl Node {
    /// Create a node carrying the mandatory `canonical_name` property.
    pub fn new(id: NodeId, entity_type: EntityType, canonical_name: &str) -> Self {
        let mut properties = Properties::new();
        properties.insert(
            CANONICAL_NAME_KEY.to_string(),
            PropertyValue::Text(canonical_name.to_string()),
        );
        Self {
            id,
            entity_type,
            properties,
        }
    }

    pub fn canonical_name(&self) -> Option<&str> {
        self.properties
            .get(CANONICAL_NAME_KEY)
            .and_then(PropertyValue::as_text)
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Set or replace a property. `canonical_name` is immutable once set.
    pub fn set_property(&mut self, key: &str, value: PropertyValue) -> Result<(), GraphError> {
        if key == CANONICAL_NAME_KEY {
            return Err(GraphError::InvalidProperty {
                key: key.to_string(),
                reason: "canonical_name is immutable".to_string(),
            });
        }
        value.validate(key)?;
        self.properties.insert(key.to_string(), value);
        Ok(())
    }

    /// Structural checks applied on insertion into a store.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.canonical_name().is_none() {
            return Err(GraphError::MissingCanonicalName { id: self.id });
        }
        for (key, value) in &self.properties {
            value.validate(key)?;
        }
        Ok(())
    }
}
