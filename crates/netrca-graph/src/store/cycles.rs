//! Feedback-loop detection via Tarjan's SCC.
//!
//! Cycles are legal in the knowledge graph (flapping links, route
//! oscillation); this only reports them.

use netrca_core::NodeId;
use petgraph::algo::tarjan_scc;

use super::GraphStore;

/// Strongly connected components that form a loop: more than one node, or a
/// single node with a self-loop. Each component is sorted; components are
/// ordered by their smallest id.
pub fn find_cycles(store: &GraphStore) -> Vec<Vec<NodeId>> {
    let graph = store.graph();
    let mut cycles: Vec<Vec<NodeId>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.find_edge(scc[0], scc[0]).is_some())
        .map(|scc| {
            let mut ids: Vec<NodeId> = scc
                .into_iter()
                .filter_map(|idx| graph.node_weight(idx).map(|n| n.id))
                .collect();
            ids.sort();
            ids
        })
        .collect();
    cycles.sort();
    cycles
}

