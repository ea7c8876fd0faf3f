//! Typed property values for nodes and edges.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

/// Property map. Ordered so serialized snapshots are stable.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value: text, integer, float, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl PropertyValue {
    /// Build a float value. NaN and infinities are rejected.
    pub fn float(key: &str, value: f64) -> Result<Self, GraphError> {
        if value.is_finite() {
            Ok(Self::Float(value))
        } else {
            Err(GraphError::InvalidProperty {
                key: key.to_string(),
                reason: format!("non-finite float {value}"),
            })
        }
    }

    /// Check a value that may have bypassed the constructors (e.g. deserialized).
    pub fn validate(&self, key: &str) -> Result<(), GraphError> {
        match self {
            Self::Float(v) => Self::float(key, *v).map(|_| ()),
            _ => Ok(()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
