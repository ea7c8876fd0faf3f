//! Property tests for registry resolution and causal traversal.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;

use netrca_core::models::{Edge, EdgeId, EdgeWeights, EntityType, Node, NodeId, Relation};
use netrca_graph::traversal::EdgeScorer;
use netrca_graph::{
    EntityRegistry, GraphStore, Termination, TraversalEngine, TraversalQuery,
};

/// Random multigraph with `n` nodes; cycles and parallel edges allowed.
fn build_random_graph(n: usize, edges: &[(usize, usize, usize, f64)]) -> GraphStore {
    let mut store = GraphStore::new();
    for i in 0..n {
        store
            .add_node(Node::new(
                NodeId(i as u64 + 1),
                EntityType::ProtocolEvent,
                &format!("n{i}"),
            ))
            .unwrap();
    }
    for (k, &(src, tgt, rel, score)) in edges.iter().enumerate() {
        store
            .add_edge(Edge::new(
                EdgeId(k as u64 + 1),
                NodeId(src as u64 + 1),
                NodeId(tgt as u64 + 1),
                Relation::ALL[rel],
                EdgeWeights::uniform(score).unwrap(),
            ))
            .unwrap();
    }
    store
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, usize, f64)>> {
    prop::collection::vec(
        (0..n, 0..n, 0..Relation::COUNT, 0.05_f64..1.0_f64),
        0..n * 3,
    )
}

// =============================================================================
// Registry: idempotence and bijection
// =============================================================================
proptest! {
    #[test]
    fn resolve_is_idempotent_and_injective(
        keys in prop::collection::vec((0..EntityType::COUNT, "[A-Z_]{1,6}"), 1..40)
    ) {
        let mut store = GraphStore::new();
        let mut registry = EntityRegistry::new();
        let mut seen = std::collections::HashMap::new();

        for (t, name) in &keys {
            let entity_type = EntityType::ALL[*t];
            let id = registry.resolve_typed(&mut store, entity_type, name).unwrap();
            let again = registry.resolve_typed(&mut store, entity_type, name).unwrap();
            prop_assert_eq!(id, again);
            if let Some(previous) = seen.insert((entity_type, name.clone()), id) {
                prop_assert_eq!(previous, id);
            }
        }

        prop_assert_eq!(store.node_count(), seen.len());
        let mut ids: Vec<NodeId> = seen.values().copied().collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), seen.len());
    }
}

// =============================================================================
// Scoring: extending a path never raises its score
// =============================================================================
proptest! {
    #[test]
    fn combine_stays_in_unit_interval_and_is_monotonic(
        t in 0.0_f64..=1.0, s in 0.0_f64..=1.0, c in 0.0_f64..=1.0, bump in 0.0_f64..=1.0
    ) {
        let scorer = EdgeScorer::default();
        let base = scorer.combine(t, s, c);
        prop_assert!((0.0..=1.0).contains(&base));
        let t2 = (t + bump).min(1.0);
        prop_assert!(scorer.combine(t2, s, c) >= base);
    }
}

proptest! {
    #[test]
    fn path_scores_never_increase_along_a_path(
        edges in edge_strategy(12),
        seed in 0_usize..12
    ) {
        let store = build_random_graph(12, &edges);
        let query = TraversalQuery::from_seed(NodeId(seed as u64 + 1)).with_max_paths(50);
        let outcome = TraversalEngine::default().traverse(&store, &query);

        for path in &outcome.paths {
            let mut previous = 1.0;
            for hop in &path.hops {
                prop_assert!(hop.cumulative_score <= previous + 1e-12);
                previous = hop.cumulative_score;
            }
            prop_assert!((path.score - previous).abs() < 1e-12);
        }
    }
}

// =============================================================================
// Bounds, cycle guard, integrity
// =============================================================================
proptest! {
    #[test]
    fn paths_respect_hop_limit_and_are_simple(
        max_hops in 1_usize..6,
        exhaustive in any::<bool>(),
        edges in edge_strategy(10),
        seed in 0_usize..10
    ) {
        let store = build_random_graph(10, &edges);
        let query = TraversalQuery::from_seed(NodeId(seed as u64 + 1))
            .with_max_hops(max_hops)
            .with_max_paths(100)
            .with_exhaustive(exhaustive);
        let outcome = TraversalEngine::default().traverse(&store, &query);

        for path in &outcome.paths {
            prop_assert!(path.hop_count() <= max_hops);
            prop_assert_eq!(path.nodes.len(), path.hops.len() + 1);

            let mut nodes = path.nodes.clone();
            nodes.sort();
            nodes.dedup();
            prop_assert_eq!(nodes.len(), path.nodes.len(), "path revisits a node");

            for hop in &path.hops {
                let edge = store.get_edge(hop.edge);
                prop_assert!(edge.is_some());
                prop_assert!(store.get_node(hop.from).is_some());
                prop_assert!(store.get_node(hop.to).is_some());
            }
        }
        prop_assert!(outcome.paths.len() <= 100);
    }
}

proptest! {
    #[test]
    fn every_search_terminates_with_consistent_state(
        edges in edge_strategy(8),
        seed in 0_usize..8,
        target in 0_usize..8
    ) {
        let store = build_random_graph(8, &edges);
        let query = TraversalQuery::from_seed(NodeId(seed as u64 + 1))
            .to_target(NodeId(target as u64 + 1))
            .with_max_hops(5);
        let outcome = TraversalEngine::default().traverse(&store, &query);

        match outcome.termination {
            Termination::Found => prop_assert!(!outcome.paths.is_empty()),
            Termination::Exhausted | Termination::HopLimitReached => {
                prop_assert!(outcome.paths.is_empty())
            }
            Termination::Cancelled => prop_assert!(false, "no cancellation was requested"),
        }
        for path in &outcome.paths {
            prop_assert_eq!(path.terminal(), NodeId(target as u64 + 1));
        }
    }
}

/// Fewest outgoing hops from `from` to `to`, if reachable.
fn hop_distance(edges: &[(usize, usize, usize, f64)], from: usize, to: usize) -> Option<usize> {
    let mut seen = BTreeSet::from([from]);
    let mut queue = VecDeque::from([(from, 0)]);
    while let Some((node, dist)) = queue.pop_front() {
        if node == to {
            return Some(dist);
        }
        for &(src, tgt, _, _) in edges {
            if src == node && seen.insert(tgt) {
                queue.push_back((tgt, dist + 1));
            }
        }
    }
    None
}

proptest! {
    #[test]
    fn target_within_hop_limit_is_always_found(
        edges in edge_strategy(8),
        seed in 0_usize..8,
        target in 0_usize..8,
        max_hops in 1_usize..5
    ) {
        prop_assume!(seed != target);
        let store = build_random_graph(8, &edges);
        let query = TraversalQuery::from_seed(NodeId(seed as u64 + 1))
            .to_target(NodeId(target as u64 + 1))
            .with_max_hops(max_hops);
        let outcome = TraversalEngine::default().traverse(&store, &query);

        match hop_distance(&edges, seed, target) {
            Some(dist) if dist <= max_hops => {
                prop_assert_eq!(outcome.termination, Termination::Found);
                prop_assert!(outcome.paths[0].hop_count() <= max_hops);
            }
            _ => prop_assert!(outcome.paths.is_empty()),
        }
    }
}

proptest! {
    #[test]
    fn outcome_is_deterministic(edges in edge_strategy(10), seed in 0_usize..10) {
        let query = TraversalQuery::from_seed(NodeId(seed as u64 + 1));
        let engine = TraversalEngine::default();
        let a = engine.traverse(&build_random_graph(10, &edges), &query);
        let b = engine.traverse(&build_random_graph(10, &edges), &query);
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
