//! Traversal engine: seeded, weighted, cycle-safe search for causal chains.

pub mod cancellation;
mod frontier;
pub mod scoring;
pub mod search;

use netrca_core::config::{ScoringConfig, TraversalConfig};
use netrca_core::models::{EdgeId, NodeId, Relation};
use netrca_core::RcaConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::snapshot::GraphSnapshot;
use crate::store::{Direction, GraphStore};

pub use cancellation::{Cancellable, CancellationToken, Deadline};
pub use scoring::EdgeScorer;
pub use search::{Search, SearchState};

/// How a search ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// At least one path was emitted.
    Found,
    /// Frontier drained without reaching a target.
    Exhausted,
    /// No target reached, and some branches were cut at `max_hops`.
    HopLimitReached,
    /// The cancellation signal fired; only paths completed before it are kept.
    Cancelled,
}

/// One traversed edge inside a [`CausalPath`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathHop {
    pub edge: EdgeId,
    /// Node the hop leaves, in traversal order.
    pub from: NodeId,
    /// Node the hop arrives at, in traversal order.
    pub to: NodeId,
    pub relation: Relation,
    pub edge_score: f64,
    pub cumulative_score: f64,
}

/// An ordered chain from a seed to a terminal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalPath {
    pub nodes: Vec<NodeId>,
    pub hops: Vec<PathHop>,
    pub score: f64,
}

impl CausalPath {
    pub fn seed(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn terminal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    pub fn edges(&self) -> Vec<EdgeId> {
        self.hops.iter().map(|h| h.edge).collect()
    }
}

/// A causal search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalQuery {
    /// Observed symptoms to start from.
    pub seeds: Vec<NodeId>,
    /// Candidate causes. Empty means every reached node is a candidate.
    #[serde(default)]
    pub targets: Vec<NodeId>,
    /// Overrides `traversal.max_hops`.
    #[serde(default)]
    pub max_hops: Option<usize>,
    /// Overrides `traversal.max_paths`.
    #[serde(default)]
    pub max_paths: Option<usize>,
    /// Overrides `traversal.exhaustive`.
    #[serde(default)]
    pub exhaustive: Option<bool>,
    /// Only follow edges with these labels.
    #[serde(default)]
    pub relations: Option<Vec<Relation>>,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_direction() -> Direction {
    Direction::Outgoing
}

impl TraversalQuery {
    pub fn new(seeds: Vec<NodeId>) -> Self {
        Self {
            seeds,
            targets: Vec::new(),
            max_hops: None,
            max_paths: None,
            exhaustive: None,
            relations: None,
            direction: default_direction(),
        }
    }

    pub fn from_seed(seed: NodeId) -> Self {
        Self::new(vec![seed])
    }

    pub fn to_target(mut self, target: NodeId) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_targets(mut self, targets: Vec<NodeId>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    pub fn with_exhaustive(mut self, exhaustive: bool) -> Self {
        self.exhaustive = Some(exhaustive);
        self
    }

    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = Some(relations);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// Result of a traversal: terminal state plus ranked paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalOutcome {
    pub termination: Termination,
    pub paths: Vec<CausalPath>,
    /// Number of frontier entries that were expanded.
    pub expansions: usize,
}

impl TraversalOutcome {
    pub fn best(&self) -> Option<&CausalPath> {
        self.paths.first()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Stateless search front-end; safe to share across threads.
#[derive(Debug, Clone)]
pub struct TraversalEngine {
    pub config: TraversalConfig,
    scorer: EdgeScorer,
}

impl TraversalEngine {
    pub fn new(config: TraversalConfig, scoring: &ScoringConfig) -> Self {
        Self {
            config,
            scorer: EdgeScorer::from_config(scoring),
        }
    }

    pub fn from_config(config: &RcaConfig) -> Self {
        Self::new(config.traversal.clone(), &config.scoring)
    }

    pub fn scorer(&self) -> &EdgeScorer {
        &self.scorer
    }

    /// A search in `Idle` state, for callers that drive it step by step.
    pub fn search<'a>(&self, store: &'a GraphStore, query: &TraversalQuery) -> Search<'a> {
        Search::new(store, self.scorer, &self.config, query)
    }

    pub fn traverse(&self, store: &GraphStore, query: &TraversalQuery) -> TraversalOutcome {
        self.run(store, query, None)
    }

    /// Like [`Self::traverse`], polling `cancel` before every expansion.
    pub fn traverse_with_cancel(
        &self,
        store: &GraphStore,
        query: &TraversalQuery,
        cancel: &dyn Cancellable,
    ) -> TraversalOutcome {
        self.run(store, query, Some(cancel))
    }

    /// Run independent queries in parallel against one snapshot.
    /// Outcomes are returned in query order.
    pub fn traverse_many(
        &self,
        snapshot: &GraphSnapshot,
        queries: &[TraversalQuery],
    ) -> Vec<TraversalOutcome> {
        let store = snapshot.store();
        queries
            .par_iter()
            .map(|query| self.traverse(store, query))
            .collect()
    }

    fn run(
        &self,
        store: &GraphStore,
        query: &TraversalQuery,
        cancel: Option<&dyn Cancellable>,
    ) -> TraversalOutcome {
        let _span = tracing::debug_span!(
            "netrca.traversal",
            seeds = query.seeds.len(),
            targets = query.targets.len()
        )
        .entered();
        self.search(store, query).run(cancel)
    }
}

impl Default for TraversalEngine {
    fn default() -> Self {
        Self::new(TraversalConfig::default(), &ScoringConfig::default())
    }
}
