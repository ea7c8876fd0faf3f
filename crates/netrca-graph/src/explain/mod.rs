//! Path explainer: turns a scored path into a readable, evidence-backed chain.
//!
//! Pure read over the store. Every node and edge the path names must exist in
//! the store it is explained against.

pub mod confidence;
pub mod templates;

use netrca_core::models::{Edge, EdgeId, EntityType, Node, NodeId, Relation};
use netrca_core::{GraphError, RcaResult};
use serde::Serialize;

use crate::store::GraphStore;
use crate::traversal::{CausalPath, TraversalOutcome};

pub use confidence::ConfidenceLevel;

/// One node of an explained path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainedStep {
    pub position: usize,
    pub node_id: NodeId,
    pub entity_type: EntityType,
    pub canonical_name: String,
    /// Label of the edge entering this node; `None` for the seed.
    pub relation: Option<Relation>,
    /// Score of the edge entering this node; `None` for the seed.
    pub hop_score: Option<f64>,
    pub cumulative_score: f64,
    /// Evidence source ids of the entering edge, sorted and deduplicated.
    pub evidence_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathExplanation {
    pub seed: NodeId,
    pub terminal: NodeId,
    pub score: f64,
    pub confidence_level: ConfidenceLevel,
    pub steps: Vec<ExplainedStep>,
    /// One line, e.g. `LINK_FAILURE causes INTERFACE_DOWN; ... (score 0.810, high confidence)`.
    pub summary: String,
}

impl PathExplanation {
    /// Evidence sources across the whole chain, sorted and deduplicated.
    pub fn evidence_sources(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .steps
            .iter()
            .flat_map(|s| s.evidence_sources.iter().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathExplainer;

impl PathExplainer {
    pub fn new() -> Self {
        Self
    }

    pub fn explain(&self, store: &GraphStore, path: &CausalPath) -> RcaResult<PathExplanation> {
        let Some(&seed) = path.nodes.first() else {
            return Err(GraphError::EmptyPath.into());
        };

        let seed_node = require_node(store, seed)?;
        let mut steps = vec![ExplainedStep {
            position: 0,
            node_id: seed,
            entity_type: seed_node.entity_type,
            canonical_name: seed_node.canonical_name().unwrap_or_default().to_string(),
            relation: None,
            hop_score: None,
            cumulative_score: 1.0,
            evidence_sources: Vec::new(),
        }];
        let mut sentences = Vec::with_capacity(path.hops.len());

        for (i, hop) in path.hops.iter().enumerate() {
            let edge = require_edge(store, hop.edge)?;
            let consistent = path.nodes.get(i) == Some(&hop.from)
                && path.nodes.get(i + 1) == Some(&hop.to)
                && (edge.source == hop.from || edge.target == hop.from)
                && edge.opposite(hop.from) == hop.to;
            if !consistent {
                return Err(GraphError::EdgeNotFound { id: hop.edge }.into());
            }
            let node = require_node(store, hop.to)?;

            let source_name = name_of(store, edge.source)?;
            let target_name = name_of(store, edge.target)?;
            sentences.push(templates::render(edge.relation, source_name, target_name));

            steps.push(ExplainedStep {
                position: i + 1,
                node_id: hop.to,
                entity_type: node.entity_type,
                canonical_name: node.canonical_name().unwrap_or_default().to_string(),
                relation: Some(edge.relation),
                hop_score: Some(hop.edge_score),
                cumulative_score: hop.cumulative_score,
                evidence_sources: edge.evidence_sources(),
            });
        }
        if steps.len() != path.nodes.len() {
            let missing = path.nodes[steps.len()];
            return Err(GraphError::NodeNotFound { id: missing }.into());
        }

        let confidence_level = ConfidenceLevel::from_score(path.score);
        let chain = if sentences.is_empty() {
            steps[0].canonical_name.clone()
        } else {
            sentences.join("; ")
        };
        let summary = format!(
            "{chain} (score {:.3}, {} confidence)",
            path.score, confidence_level
        );

        Ok(PathExplanation {
            seed,
            terminal: path.nodes[path.nodes.len() - 1],
            score: path.score,
            confidence_level,
            steps,
            summary,
        })
    }

    /// Explain every path of an outcome, in rank order.
    pub fn explain_outcome(
        &self,
        store: &GraphStore,
        outcome: &TraversalOutcome,
    ) -> RcaResult<Vec<PathExplanation>> {
        outcome
            .paths
            .iter()
            .map(|path| self.explain(store, path))
            .collect()
    }
}

fn require_node(store: &GraphStore, id: NodeId) -> Result<&Node, GraphError> {
    store.get_node(id).ok_or(GraphError::NodeNotFound { id })
}

fn require_edge(store: &GraphStore, id: EdgeId) -> Result<&Edge, GraphError> {
    store.get_edge(id).ok_or(GraphError::EdgeNotFound { id })
}

fn name_of(store: &GraphStore, id: NodeId) -> Result<&str, GraphError> {
    Ok(require_node(store, id)?.canonical_name().unwrap_or_default())
}
