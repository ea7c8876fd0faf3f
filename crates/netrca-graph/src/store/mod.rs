//! Graph store: owns every node and edge, addressed by stable id.
//!
//! Backed by a `petgraph::StableGraph` (parallel edges and cycles allowed)
//! plus id → index maps for O(1) lookup. Neighbor expansion walks petgraph's
//! per-node adjacency lists, so it costs O(out-degree) or O(in-degree).
//! There is no internal locking: mutation requires `&mut self`.

pub mod cycles;
pub mod stats;

use std::collections::HashMap;

use netrca_core::models::{
    check_unit, Edge, EdgeEvidence, EdgeId, Node, NodeId, PropertyValue, Relation,
};
use netrca_core::GraphError;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

pub use stats::GraphStats;

/// The underlying directed multigraph type.
pub type KnowledgeStableGraph = StableGraph<Node, Edge, Directed>;

/// Which adjacency list to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// In-memory property graph store.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    graph: KnowledgeStableGraph,
    node_index: HashMap<NodeId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
    max_node_id: Option<NodeId>,
    max_edge_id: Option<EdgeId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Fails if the id is taken or `canonical_name` is missing.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        let id = node.id;
        if self.node_index.contains_key(&id) {
            return Err(GraphError::DuplicateNodeId { id });
        }
        node.validate()?;

        tracing::debug!(node = %id, entity_type = %node.entity_type, "node added");
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        self.max_node_id = self.max_node_id.max(Some(id));
        Ok(id)
    }

    /// Insert an edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        let id = edge.id;
        if self.edge_index.contains_key(&id) {
            return Err(GraphError::DuplicateEdgeId { id });
        }
        let source_idx = self.index_of(edge.source).ok_or(GraphError::DanglingReference {
            edge: id,
            missing: edge.source,
        })?;
        let target_idx = self.index_of(edge.target).ok_or(GraphError::DanglingReference {
            edge: id,
            missing: edge.target,
        })?;
        edge.validate()?;

        tracing::debug!(
            edge = %id,
            source = %edge.source,
            target = %edge.target,
            relation = %edge.relation,
            "edge added"
        );
        let idx = self.graph.add_edge(source_idx, target_idx, edge);
        self.edge_index.insert(id, idx);
        self.max_edge_id = self.max_edge_id.max(Some(id));
        Ok(id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index
            .get(&id)
            .and_then(|&idx| self.graph.edge_weight(idx))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Edges incident to `node` in the given direction, ordered by edge id.
    /// A self-loop is listed once under `Both`. Unknown nodes yield nothing.
    pub fn incident_edges(&self, node: NodeId, direction: Direction) -> Vec<&Edge> {
        let Some(idx) = self.index_of(node) else {
            return Vec::new();
        };

        let mut edges: Vec<&Edge> = match direction {
            Direction::Outgoing => self
                .graph
                .edges_directed(idx, petgraph::Direction::Outgoing)
                .map(|e| e.weight())
                .collect(),
            Direction::Incoming => self
                .graph
                .edges_directed(idx, petgraph::Direction::Incoming)
                .map(|e| e.weight())
                .collect(),
            Direction::Both => self
                .graph
                .edges_directed(idx, petgraph::Direction::Outgoing)
                .chain(self.graph.edges_directed(idx, petgraph::Direction::Incoming))
                .map(|e| e.weight())
                .collect(),
        };
        edges.sort_by_key(|e| e.id);
        edges.dedup_by_key(|e| e.id);
        edges
    }

    /// `(edge_id, neighbor_id)` pairs for `node`, ordered by edge id.
    pub fn neighbors(&self, node: NodeId, direction: Direction) -> Vec<(EdgeId, NodeId)> {
        self.incident_edges(node, direction)
            .into_iter()
            .map(|e| (e.id, e.opposite(node)))
            .collect()
    }

    /// The edge labeled `relation` from `source` to `target`, if any.
    pub fn find_edge(&self, source: NodeId, target: NodeId, relation: Relation) -> Option<&Edge> {
        let (a, b) = (self.index_of(source)?, self.index_of(target)?);
        self.graph
            .edges_directed(a, petgraph::Direction::Outgoing)
            .filter(|e| e.target() == b)
            .map(|e| e.weight())
            .filter(|e| e.relation == relation)
            .min_by_key(|e| e.id)
    }

    pub fn set_node_property(
        &mut self,
        id: NodeId,
        key: &str,
        value: PropertyValue,
    ) -> Result<(), GraphError> {
        self.node_mut(id)?.set_property(key, value)
    }

    pub fn set_edge_property(
        &mut self,
        id: EdgeId,
        key: &str,
        value: PropertyValue,
    ) -> Result<(), GraphError> {
        self.edge_mut(id)?.set_property(key, value)
    }

    /// Record the similarity score produced by the embedding collaborator.
    pub fn set_semantic_weight(&mut self, id: EdgeId, score: f64) -> Result<(), GraphError> {
        let score = check_unit("semantic", score)?;
        self.edge_mut(id)?.weights.semantic = score;
        Ok(())
    }

    /// Fold a repeated assertion of an existing edge into it: the stronger
    /// confidence wins, and so does the stronger topological weight when the
    /// assertion carries one. New evidence is appended.
    pub fn merge_edge_support(
        &mut self,
        id: EdgeId,
        source_confidence: f64,
        topological: Option<f64>,
        evidence: &[EdgeEvidence],
    ) -> Result<(), GraphError> {
        let source_confidence = check_unit("source_confidence", source_confidence)?;
        let topological = topological
            .map(|t| check_unit("topological", t))
            .transpose()?;
        let edge = self.edge_mut(id)?;
        edge.weights.source_confidence = edge.weights.source_confidence.max(source_confidence);
        if let Some(topological) = topological {
            edge.weights.topological = edge.weights.topological.max(topological);
        }
        for item in evidence {
            if !edge.evidence.contains(item) {
                edge.evidence.push(item.clone());
            }
        }
        Ok(())
    }

    /// All nodes, ordered by id.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.graph.node_weights().collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    /// All edges, ordered by id.
    pub fn edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.graph.edge_weights().collect();
        edges.sort_by_key(|e| e.id);
        edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn max_node_id(&self) -> Option<NodeId> {
        self.max_node_id
    }

    /// The id following the highest edge id ever inserted.
    pub fn next_edge_id(&self) -> EdgeId {
        EdgeId(self.max_edge_id.map_or(1, |id| id.0 + 1))
    }

    pub fn stats(&self) -> GraphStats {
        stats::compute(self)
    }

    /// Feedback loops: strongly connected components with more than one node.
    pub fn find_cycles(&self) -> Vec<Vec<NodeId>> {
        cycles::find_cycles(self)
    }

    pub(crate) fn graph(&self) -> &KnowledgeStableGraph {
        &self.graph
    }

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        let idx = self.index_of(id).ok_or(GraphError::NodeNotFound { id })?;
        self.graph
            .node_weight_mut(idx)
            .ok_or(GraphError::NodeNotFound { id })
    }

    fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge, GraphError> {
        let idx = *self
            .edge_index
            .get(&id)
            .ok_or(GraphError::EdgeNotFound { id })?;
        self.graph
            .edge_weight_mut(idx)
            .ok_or(GraphError::EdgeNotFound { id })
    }
}
