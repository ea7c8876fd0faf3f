//! Store statistics for health reporting.

use std::collections::BTreeMap;

use netrca_core::models::{EntityType, Relation};
use serde::{Deserialize, Serialize};

use super::GraphStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes_by_type: BTreeMap<EntityType, usize>,
    pub edges_by_relation: BTreeMap<Relation, usize>,
    /// Number of feedback loops (see [`super::cycles::find_cycles`]).
    pub cycle_count: usize,
    /// Nodes with no incident edge at all.
    pub isolated_nodes: usize,
}

pub(super) fn compute(store: &GraphStore) -> GraphStats {
    let mut nodes_by_type = BTreeMap::new();
    let mut isolated_nodes = 0;
    for node in store.nodes() {
        *nodes_by_type.entry(node.entity_type).or_insert(0) += 1;
        if store
            .incident_edges(node.id, super::Direction::Both)
            .is_empty()
        {
            isolated_nodes += 1;
        }
    }

    let mut edges_by_relation = BTreeMap::new();
    for edge in store.edges() {
        *edges_by_relation.entry(edge.relation).or_insert(0) += 1;
    }

    GraphStats {
        node_count: store.node_count(),
        edge_count: store.edge_count(),
        nodes_by_type,
        edges_by_relation,
        cycle_count: store.find_cycles().len(),
        isolated_nodes,
    }
}
