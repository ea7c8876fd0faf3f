use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EdgeId, NodeId, Properties, PropertyValue, Relation};
use crate::errors::GraphError;

/// The three weight components every edge carries, each within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeights {
    /// Derived from graph distance between the endpoints in the source material.
    #[serde(rename = "topological_weight")]
    pub topological: f64,
    /// Similarity score supplied by the embedding collaborator.
    #[serde(rename = "semantic_weight")]
    pub semantic: f64,
    /// Authority of the document that asserted the relationship.
    pub source_confidence: f64,
}

impl EdgeWeights {
    pub fn new(topological: f64, semantic: f64, source_confidence: f64) -> Result<Self, GraphError> {
        let weights = Self {
            topological,
            semantic,
            source_confidence,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// All three components set to the same value.
    pub fn uniform(value: f64) -> Result<Self, GraphError> {
        Self::new(value, value, value)
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        check_unit("topological", self.topological)?;
        check_unit("semantic", self.semantic)?;
        check_unit("source_confidence", self.source_confidence)?;
        Ok(())
    }
}

/// Reject anything outside [0, 1], including NaN.
pub fn check_unit(component: &'static str, value: f64) -> Result<f64, GraphError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GraphError::InvalidWeight { component, value })
    }
}

/// A document passage supporting an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEvidence {
    /// Id of the source document or chunk.
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl EdgeEvidence {
    pub fn from_source(source_id: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            excerpt: None,
            recorded_at: None,
        }
    }
}

/// A directed, labeled relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub relation: Relation,
    pub weights: EdgeWeights,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub evidence: Vec<EdgeEvidence>,
}

impl Edge {
    pub fn new(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        relation: Relation,
        weights: EdgeWeights,
    ) -> Self {
        Self {
            id,
            source,
            target,
            relation,
            weights,
            properties: Properties::new(),
            evidence: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<EdgeEvidence>) -> Self {
        self.evidence = evidence;
        self
    }

    /// The other endpoint, seen from `node`.
    pub fn opposite(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }

    /// Distinct evidence source ids, sorted.
    pub fn evidence_sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = self.evidence.iter().map(|e| e.source_id.clone()).collect();
        sources.sort();
        sources.dedup();
        sources
    }

    pub fn set_property(&mut self, key: &str, value: PropertyValue) -> Result<(), GraphError> {
        value.validate(key)?;
        self.properties.insert(key.to_string(), value);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        self.weights.validate()?;
        for (key, value) in &self.properties {
            value.validate(key)?;
        }
        Ok(())
    }
}
