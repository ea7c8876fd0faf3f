//! Frontier entries for the best-first search.

use std::cmp::Ordering;

use netrca_core::models::{Edge, NodeId};

use super::{CausalPath, PathHop};

/// A partial path waiting on the frontier.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub score: f64,
    pub nodes: Vec<NodeId>,
    pub hops: Vec<PathHop>,
}

impl Candidate {
    pub fn seed(node: NodeId) -> Self {
        Self {
            score: 1.0,
            nodes: vec![node],
            hops: Vec::new(),
        }
    }

    /// The node this partial path currently ends at.
    pub fn head(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn extend(&self, edge: &Edge, neighbor: NodeId, edge_score: f64, score: f64) -> Self {
        let mut next = self.clone();
        next.hops.push(PathHop {
            edge: edge.id,
            from: self.head(),
            to: neighbor,
            relation: edge.relation,
            edge_score,
            cumulative_score: score,
        });
        next.nodes.push(neighbor);
        next.score = score;
        next
    }

    pub fn to_path(&self) -> CausalPath {
        CausalPath {
            nodes: self.nodes.clone(),
            hops: self.hops.clone(),
            score: self.score,
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    /// Max-heap order: higher score first, then fewer hops, then lower head
    /// node id, then the lexicographically smaller edge-id sequence.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.hop_count().cmp(&self.hop_count()))
            .then_with(|| other.head().cmp(&self.head()))
            .then_with(|| {
                let mine = self.hops.iter().map(|h| h.edge);
                let theirs = other.hops.iter().map(|h| h.edge);
                theirs.cmp(mine)
            })
            .then_with(|| other.nodes.cmp(&self.nodes))
    }
}

/// Deterministic ranking of emitted paths: best score first, then fewer
/// hops, then lower terminal id, then edge sequence.
pub(crate) fn rank_paths(a: &CausalPath, b: &CausalPath) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.hop_count().cmp(&b.hop_count()))
        .then_with(|| a.terminal().cmp(&b.terminal()))
        .then_with(|| a.edges().cmp(&b.edges()))
        .then_with(|| a.nodes.cmp(&b.nodes))
}
