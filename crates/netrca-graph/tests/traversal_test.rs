//! Weighted best-first causal search.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use netrca_core::config::{ScoringConfig, TraversalConfig};
use netrca_core::models::{Edge, EdgeId, EdgeWeights, EntityType, Node, NodeId, Relation};
use netrca_core::RcaConfig;
use netrca_graph::traversal::{EdgeScorer, SearchState};
use netrca_graph::{
    Cancellable, CancellationToken, CausalPath, Deadline, Direction, EntityMention, GraphStore,
    IngestBatch, RelationshipTuple, Termination, TraversalEngine, TraversalQuery,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    store: GraphStore,
    ids: HashMap<&'static str, NodeId>,
}

impl Fixture {
    fn id(&self, name: &str) -> NodeId {
        self.ids[name]
    }

    fn names(&self, path: &CausalPath) -> Vec<&'static str> {
        path.nodes
            .iter()
            .map(|id| {
                *self
                    .ids
                    .iter()
                    .find(|(_, v)| *v == id)
                    .map(|(k, _)| k)
                    .unwrap()
            })
            .collect()
    }
}

/// Nodes get ids 1.. in order; edges get ids 1.. in order. Uniform weights
/// make the edge score equal the given value.
fn graph(names: &[&'static str], edges: &[(&str, &str, Relation, f64)]) -> Fixture {
    let mut store = GraphStore::new();
    let mut ids = HashMap::new();
    for (i, name) in names.iter().enumerate() {
        let id = NodeId(i as u64 + 1);
        store
            .add_node(Node::new(id, EntityType::ProtocolEvent, name))
            .unwrap();
        ids.insert(*name, id);
    }
    for (i, (source, target, relation, score)) in edges.iter().enumerate() {
        store
            .add_edge(Edge::new(
                EdgeId(i as u64 + 1),
                ids[source],
                ids[target],
                *relation,
                EdgeWeights::uniform(*score).unwrap(),
            ))
            .unwrap();
    }
    Fixture { store, ids }
}

fn link_failure_chain() -> Fixture {
    graph(
        &["LINK_FAILURE", "INTERFACE_DOWN", "BGP_SESSION_RESET", "UNRELATED_NODE"],
        &[
            ("LINK_FAILURE", "INTERFACE_DOWN", Relation::Causes, 0.9),
            ("INTERFACE_DOWN", "BGP_SESSION_RESET", Relation::Causes, 0.9),
        ],
    )
}

/// A -> D directly (0.5) or through B (0.9 * 0.9).
fn diamond() -> Fixture {
    graph(
        &["A", "B", "D"],
        &[
            ("A", "D", Relation::Causes, 0.5),
            ("A", "B", Relation::Causes, 0.9),
            ("B", "D", Relation::Causes, 0.9),
        ],
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Reports cancellation once it has been polled `allowed` times.
struct CancelAfter {
    remaining: AtomicUsize,
}

impl CancelAfter {
    fn new(allowed: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(allowed),
        }
    }
}

impl Cancellable for CancelAfter {
    fn is_cancelled(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn uniform_weights_score_their_value() {
    let scorer = EdgeScorer::default();
    assert_close(scorer.combine(0.9, 0.9, 0.9), 0.9);
    assert_close(scorer.combine(1.0, 1.0, 1.0), 1.0);
    assert_eq!(scorer.combine(0.0, 1.0, 1.0), 0.0);
}

#[test]
fn combine_uses_configured_exponents() {
    let scorer = EdgeScorer::default();
    let expected = 1.0_f64.powf(0.25) * 0.9_f64.powf(0.35) * 0.8_f64.powf(0.40);
    assert_close(scorer.combine(1.0, 0.9, 0.8), expected);
}

#[test]
fn combine_is_monotonic_in_each_component() {
    let scorer = EdgeScorer::default();
    let base = scorer.combine(0.5, 0.5, 0.5);
    assert!(scorer.combine(0.6, 0.5, 0.5) >= base);
    assert!(scorer.combine(0.5, 0.6, 0.5) >= base);
    assert!(scorer.combine(0.5, 0.5, 0.6) >= base);
}

#[test]
fn zero_weighted_component_is_ignored() {
    let scoring = ScoringConfig {
        topological_weight: 0.0,
        ..ScoringConfig::default()
    };
    let scorer = EdgeScorer::from_config(&scoring);
    assert_close(scorer.combine(0.0, 0.7, 0.7), 0.7);
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn link_failure_reaches_bgp_reset() {
    let fx = link_failure_chain();
    let engine = TraversalEngine::default();
    let query = TraversalQuery::from_seed(fx.id("LINK_FAILURE"))
        .to_target(fx.id("BGP_SESSION_RESET"))
        .with_max_hops(5);

    let outcome = engine.traverse(&fx.store, &query);

    assert_eq!(outcome.termination, Termination::Found);
    let best = outcome.best().unwrap();
    assert_eq!(
        fx.names(best),
        vec!["LINK_FAILURE", "INTERFACE_DOWN", "BGP_SESSION_RESET"]
    );
    assert_close(best.score, 0.81);
    assert_eq!(best.hop_count(), 2);
    assert_eq!(best.edges(), vec![EdgeId(1), EdgeId(2)]);
    assert!(best.hops.iter().all(|h| h.relation == Relation::Causes));
    assert_close(best.hops[0].cumulative_score, 0.9);
    assert_close(best.hops[1].cumulative_score, 0.81);
}

#[test]
fn unreachable_target_is_exhausted() {
    let fx = link_failure_chain();
    let engine = TraversalEngine::default();
    let query =
        TraversalQuery::from_seed(fx.id("LINK_FAILURE")).to_target(fx.id("UNRELATED_NODE"));

    let outcome = engine.traverse(&fx.store, &query);

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert!(outcome.is_empty());
}

#[test]
fn two_node_cycle_terminates() {
    let fx = graph(
        &["A", "B", "C"],
        &[("A", "B", Relation::Causes, 0.8), ("B", "A", Relation::Causes, 0.8)],
    );
    let engine = TraversalEngine::default();

    let open = engine.traverse(&fx.store, &TraversalQuery::from_seed(fx.id("A")).with_max_hops(5));
    assert_eq!(open.termination, Termination::Found);
    assert_eq!(open.paths.len(), 1);
    assert_eq!(fx.names(&open.paths[0]), vec!["A", "B"]);

    let targeted = engine.traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("A"))
            .to_target(fx.id("C"))
            .with_max_hops(5),
    );
    assert_eq!(targeted.termination, Termination::Exhausted);
}

#[test]
fn hop_limit_reported_when_branches_were_cut() {
    let fx = link_failure_chain();
    let engine = TraversalEngine::default();
    let query = TraversalQuery::from_seed(fx.id("LINK_FAILURE"))
        .to_target(fx.id("BGP_SESSION_RESET"))
        .with_max_hops(1);

    let outcome = engine.traverse(&fx.store, &query);
    assert_eq!(outcome.termination, Termination::HopLimitReached);
    assert!(outcome.is_empty());
}

#[test]
fn found_wins_over_hop_limit() {
    let fx = graph(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", Relation::Causes, 0.9),
            ("B", "C", Relation::Causes, 0.9),
            ("C", "D", Relation::Causes, 0.9),
        ],
    );
    let outcome = TraversalEngine::default().traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("A")).with_max_hops(2),
    );
    assert_eq!(outcome.termination, Termination::Found);
    assert_eq!(outcome.paths.len(), 2);
    assert!(outcome.paths.iter().all(|p| p.hop_count() <= 2));
}

// =============================================================================
// Search order and pruning
// =============================================================================

#[test]
fn higher_score_beats_fewer_hops() {
    let fx = diamond();
    let query = TraversalQuery::from_seed(fx.id("A"))
        .to_target(fx.id("D"))
        .with_max_paths(1);
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    assert_eq!(outcome.termination, Termination::Found);
    assert_eq!(fx.names(&outcome.paths[0]), vec!["A", "B", "D"]);
    assert_close(outcome.paths[0].score, 0.81);
}

#[test]
fn dominance_keeps_one_path_per_node() {
    let fx = diamond();
    let query = TraversalQuery::from_seed(fx.id("A")).to_target(fx.id("D"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    assert_eq!(outcome.paths.len(), 1);
    assert_eq!(fx.names(&outcome.paths[0]), vec!["A", "B", "D"]);
}

#[test]
fn exhaustive_enumerates_alternatives_in_rank_order() {
    let fx = diamond();
    let query = TraversalQuery::from_seed(fx.id("A"))
        .to_target(fx.id("D"))
        .with_exhaustive(true);
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    assert_eq!(outcome.termination, Termination::Found);
    assert_eq!(outcome.paths.len(), 2);
    assert_eq!(fx.names(&outcome.paths[0]), vec!["A", "B", "D"]);
    assert_eq!(fx.names(&outcome.paths[1]), vec!["A", "D"]);
    assert_close(outcome.paths[1].score, 0.5);
}

#[test]
fn shorter_weaker_path_survives_under_hop_limit() {
    // S -> B -> A beats S -> A, but only S -> A -> T fits in two hops.
    let fx = graph(
        &["S", "A", "B", "T"],
        &[
            ("S", "A", Relation::Causes, 0.5),
            ("S", "B", Relation::Causes, 0.9),
            ("B", "A", Relation::Causes, 0.9),
            ("A", "T", Relation::Causes, 0.9),
        ],
    );
    let engine = TraversalEngine::default();

    let bounded = engine.traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("S"))
            .to_target(fx.id("T"))
            .with_max_hops(2),
    );
    assert_eq!(bounded.termination, Termination::Found);
    assert_eq!(bounded.paths.len(), 1);
    assert_eq!(fx.names(&bounded.paths[0]), vec!["S", "A", "T"]);
    assert_close(bounded.paths[0].score, 0.45);

    let unbounded = engine.traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("S")).to_target(fx.id("T")),
    );
    assert_eq!(unbounded.paths.len(), 1);
    assert_eq!(fx.names(&unbounded.paths[0]), vec!["S", "B", "A", "T"]);
    assert_close(unbounded.paths[0].score, 0.729);
}

#[test]
fn search_stops_once_every_target_is_emitted() {
    let fx = graph(
        &["A", "T", "X", "Y", "Z"],
        &[
            ("A", "T", Relation::Causes, 0.9),
            ("A", "X", Relation::Causes, 0.5),
            ("X", "Y", Relation::Causes, 0.9),
            ("Y", "Z", Relation::Causes, 0.9),
        ],
    );
    let query = TraversalQuery::from_seed(fx.id("A"))
        .to_target(fx.id("T"))
        .with_max_paths(5);
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    assert_eq!(outcome.termination, Termination::Found);
    assert_eq!(outcome.paths.len(), 1);
    assert_eq!(outcome.expansions, 1);
}

#[test]
fn open_search_ranks_every_reached_node() {
    let fx = graph(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", Relation::Causes, 0.9),
            ("A", "C", Relation::Influences, 0.5),
            ("B", "D", Relation::Causes, 0.9),
        ],
    );
    let outcome =
        TraversalEngine::default().traverse(&fx.store, &TraversalQuery::from_seed(fx.id("A")));

    let terminals: Vec<Vec<&str>> = outcome.paths.iter().map(|p| fx.names(p)).collect();
    assert_eq!(
        terminals,
        vec![vec!["A", "B"], vec!["A", "B", "D"], vec!["A", "C"]]
    );

    let capped = TraversalEngine::default().traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("A")).with_max_paths(2),
    );
    assert_eq!(capped.termination, Termination::Found);
    assert_eq!(capped.paths.len(), 2);
}

#[test]
fn parallel_edges_use_best_label() {
    let fx = graph(
        &["A", "B"],
        &[
            ("A", "B", Relation::Causes, 0.6),
            ("A", "B", Relation::Influences, 0.9),
        ],
    );
    let query = TraversalQuery::from_seed(fx.id("A")).to_target(fx.id("B"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    let hop = &outcome.paths[0].hops[0];
    assert_eq!(hop.edge, EdgeId(2));
    assert_eq!(hop.relation, Relation::Influences);
    assert_close(outcome.paths[0].score, 0.9);
}

#[test]
fn parallel_edge_tie_picks_lowest_edge_id() {
    let fx = graph(
        &["A", "B"],
        &[
            ("A", "B", Relation::Violates, 0.7),
            ("A", "B", Relation::Causes, 0.7),
        ],
    );
    let query = TraversalQuery::from_seed(fx.id("A")).to_target(fx.id("B"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(outcome.paths[0].hops[0].edge, EdgeId(1));
}

#[test]
fn relation_filter_restricts_labels() {
    let fx = graph(
        &["A", "B"],
        &[
            ("A", "B", Relation::Causes, 0.6),
            ("A", "B", Relation::Influences, 0.9),
        ],
    );
    let query = TraversalQuery::from_seed(fx.id("A"))
        .to_target(fx.id("B"))
        .with_relations(vec![Relation::Causes]);
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(outcome.paths[0].hops[0].relation, Relation::Causes);

    let none = TraversalEngine::default().traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("A"))
            .to_target(fx.id("B"))
            .with_relations(vec![Relation::DependsOn]),
    );
    assert_eq!(none.termination, Termination::Exhausted);
}

#[test]
fn min_edge_score_prunes_weak_edges() {
    let fx = graph(&["A", "B"], &[("A", "B", Relation::Causes, 0.6)]);
    let engine = TraversalEngine::new(
        TraversalConfig {
            min_edge_score: 0.7,
            ..TraversalConfig::default()
        },
        &ScoringConfig::default(),
    );
    let outcome = engine.traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("A")).to_target(fx.id("B")),
    );
    assert_eq!(outcome.termination, Termination::Exhausted);
}

#[test]
fn incoming_direction_traces_origins() {
    let fx = link_failure_chain();
    let query = TraversalQuery::from_seed(fx.id("BGP_SESSION_RESET"))
        .to_target(fx.id("LINK_FAILURE"))
        .with_direction(Direction::Incoming);
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    let path = outcome.best().unwrap();
    assert_eq!(
        fx.names(path),
        vec!["BGP_SESSION_RESET", "INTERFACE_DOWN", "LINK_FAILURE"]
    );
    assert_eq!(path.edges(), vec![EdgeId(2), EdgeId(1)]);
    assert_eq!(path.hops[0].from, fx.id("BGP_SESSION_RESET"));
    assert_eq!(path.hops[0].to, fx.id("INTERFACE_DOWN"));

    // Outgoing from the symptom finds nothing.
    let outgoing = TraversalEngine::default().traverse(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("BGP_SESSION_RESET")).to_target(fx.id("LINK_FAILURE")),
    );
    assert_eq!(outgoing.termination, Termination::Exhausted);
}

// =============================================================================
// Seeds and targets
// =============================================================================

#[test]
fn seed_is_never_matched_at_hop_zero() {
    let fx = link_failure_chain();
    let query = TraversalQuery::from_seed(fx.id("LINK_FAILURE")).to_target(fx.id("LINK_FAILURE"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert!(outcome.is_empty());
}

#[test]
fn unknown_seed_is_ignored() {
    let fx = link_failure_chain();
    let query = TraversalQuery::new(vec![NodeId(999), fx.id("LINK_FAILURE")])
        .to_target(fx.id("BGP_SESSION_RESET"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(outcome.termination, Termination::Found);

    let only_unknown = TraversalEngine::default().traverse(
        &fx.store,
        &TraversalQuery::from_seed(NodeId(999)).to_target(fx.id("BGP_SESSION_RESET")),
    );
    assert_eq!(only_unknown.termination, Termination::Exhausted);
}

#[test]
fn only_unknown_targets_is_exhausted_not_open() {
    let fx = link_failure_chain();
    let query = TraversalQuery::from_seed(fx.id("LINK_FAILURE")).to_target(NodeId(404));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert!(outcome.is_empty());
}

#[test]
fn multiple_seeds_search_together() {
    let fx = graph(
        &["S1", "S2", "ROOT"],
        &[
            ("S1", "ROOT", Relation::CausedBy, 0.4),
            ("S2", "ROOT", Relation::CausedBy, 0.8),
        ],
    );
    let query =
        TraversalQuery::new(vec![fx.id("S1"), fx.id("S2")]).to_target(fx.id("ROOT"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(fx.names(outcome.best().unwrap()), vec!["S2", "ROOT"]);
}

#[test]
fn seed_that_is_a_target_is_reached_from_another_seed() {
    let fx = graph(
        &["S1", "S2"],
        &[("S1", "S2", Relation::Causes, 0.9)],
    );
    let query = TraversalQuery::new(vec![fx.id("S1"), fx.id("S2")]).to_target(fx.id("S2"));
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);

    assert_eq!(outcome.termination, Termination::Found);
    assert_eq!(outcome.paths.len(), 1);
    assert_eq!(fx.names(&outcome.paths[0]), vec!["S1", "S2"]);
    assert_close(outcome.paths[0].score, 0.9);
}

#[test]
fn oversized_hop_override_is_capped() {
    let fx = link_failure_chain();
    let query = TraversalQuery::from_seed(fx.id("LINK_FAILURE"))
        .to_target(fx.id("BGP_SESSION_RESET"))
        .with_max_hops(10_000);
    let outcome = TraversalEngine::default().traverse(&fx.store, &query);
    assert_eq!(outcome.termination, Termination::Found);
}

// =============================================================================
// Cancellation
// =============================================================================

#[test]
fn cancelled_before_first_expansion_yields_nothing() {
    let fx = link_failure_chain();
    let token = CancellationToken::new();
    token.cancel();

    let outcome = TraversalEngine::default().traverse_with_cancel(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("LINK_FAILURE")),
        &token,
    );
    assert_eq!(outcome.termination, Termination::Cancelled);
    assert!(outcome.is_empty());
    assert_eq!(outcome.expansions, 0);
}

#[test]
fn cancellation_is_shared_between_clones() {
    let token = CancellationToken::new();
    let observer = token.clone();
    assert!(!observer.is_cancelled());
    token.cancel();
    assert!(observer.is_cancelled());
}

#[test]
fn expired_deadline_cancels() {
    let fx = link_failure_chain();
    let outcome = TraversalEngine::default().traverse_with_cancel(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("LINK_FAILURE")),
        &Deadline::at(Instant::now()),
    );
    assert_eq!(outcome.termination, Termination::Cancelled);

    let generous = TraversalEngine::default().traverse_with_cancel(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("LINK_FAILURE")),
        &Deadline::after(Duration::from_secs(3600)),
    );
    assert_eq!(generous.termination, Termination::Found);
}

#[test]
fn cancel_mid_search_keeps_completed_paths() {
    let fx = link_failure_chain();
    // Two polls pass: expand the seed, then emit INTERFACE_DOWN.
    let cancel = CancelAfter::new(2);
    let outcome = TraversalEngine::default().traverse_with_cancel(
        &fx.store,
        &TraversalQuery::from_seed(fx.id("LINK_FAILURE")),
        &cancel,
    );

    assert_eq!(outcome.termination, Termination::Cancelled);
    assert_eq!(outcome.paths.len(), 1);
    assert_eq!(
        fx.names(&outcome.paths[0]),
        vec!["LINK_FAILURE", "INTERFACE_DOWN"]
    );
}

// =============================================================================
// State machine
// =============================================================================

#[test]
fn search_steps_through_states() {
    let fx = link_failure_chain();
    let engine = TraversalEngine::default();
    let query = TraversalQuery::from_seed(fx.id("LINK_FAILURE"))
        .to_target(fx.id("BGP_SESSION_RESET"));
    let mut search = engine.search(&fx.store, &query);

    assert_eq!(search.state(), SearchState::Idle);
    assert_eq!(search.step(None), SearchState::Expanding);

    let mut steps = 0;
    while !matches!(search.state(), SearchState::Terminated(_)) {
        search.step(None);
        steps += 1;
        assert!(steps < 100, "search did not terminate");
    }
    assert_eq!(search.state(), SearchState::Terminated(Termination::Found));

    // Terminal state is sticky.
    assert_eq!(search.step(None), SearchState::Terminated(Termination::Found));
    let outcome = search.run(None);
    assert_eq!(outcome.paths.len(), 1);
}

#[test]
fn search_without_usable_seed_terminates_on_start() {
    let fx = link_failure_chain();
    let engine = TraversalEngine::default();
    let query = TraversalQuery::from_seed(NodeId(12345));
    let mut search = engine.search(&fx.store, &query);
    search.start();
    assert_eq!(search.state(), SearchState::Terminated(Termination::Exhausted));
}

// =============================================================================
// Determinism and parallel queries
// =============================================================================

#[test]
fn identical_inputs_serialize_identically() {
    let engine = TraversalEngine::default();
    let query = TraversalQuery::from_seed(NodeId(1));

    let a = engine.traverse(&diamond().store, &query);
    let b = engine.traverse(&diamond().store, &query);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

fn ingest_chain() -> netrca_graph::GraphSnapshot {
    let mut batch = IngestBatch::new(&RcaConfig::default());
    batch
        .ingest_entity(&EntityMention::new("ERROR_CODE", "UNRELATED_NODE"))
        .unwrap();
    for (source, target) in [
        ("LINK_FAILURE", "INTERFACE_DOWN"),
        ("INTERFACE_DOWN", "BGP_SESSION_RESET"),
    ] {
        batch
            .ingest_relationship(&RelationshipTuple {
                source_type: "PROTOCOL_EVENT".into(),
                source_name: source.into(),
                relation: "causes".into(),
                target_type: "PROTOCOL_EVENT".into(),
                target_name: target.into(),
                source_confidence: 0.9,
                topological_weight: Some(0.9),
                semantic_weight: Some(0.9),
                evidence: Vec::new(),
            })
            .unwrap();
    }
    batch.commit().unwrap()
}

#[test]
fn traverse_many_preserves_query_order() {
    let snapshot = ingest_chain();
    let seed = snapshot
        .lookup(EntityType::ProtocolEvent, "LINK_FAILURE")
        .unwrap();
    let reset = snapshot
        .lookup(EntityType::ProtocolEvent, "BGP_SESSION_RESET")
        .unwrap();
    let unrelated = snapshot
        .lookup(EntityType::ErrorCode, "UNRELATED_NODE")
        .unwrap();

    let queries = vec![
        TraversalQuery::from_seed(seed).to_target(reset),
        TraversalQuery::from_seed(seed).to_target(unrelated),
        TraversalQuery::from_seed(seed),
    ];
    let engine = TraversalEngine::default();
    let outcomes = engine.traverse_many(&snapshot, &queries);

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].termination, Termination::Found);
    assert_close(outcomes[0].paths[0].score, 0.81);
    assert_eq!(outcomes[1].termination, Termination::Exhausted);
    assert_eq!(outcomes[2].paths.len(), 2);

    for (query, outcome) in queries.iter().zip(&outcomes) {
        assert_eq!(&engine.traverse(snapshot.store(), query), outcome);
    }
}

#[test]
fn snapshot_is_shared_across_threads() {
    let snapshot = ingest_chain();
    let seed = snapshot
        .lookup(EntityType::ProtocolEvent, "LINK_FAILURE")
        .unwrap();
    let engine = TraversalEngine::default();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let snapshot = snapshot.clone();
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine
                    .traverse(snapshot.store(), &TraversalQuery::from_seed(seed))
                    .paths
                    .len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
