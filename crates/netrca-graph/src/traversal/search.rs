//! Best-first weighted causal search as an explicit state machine:
//! `Idle -> Expanding -> Terminated(..)`.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};

use netrca_core::config::TraversalConfig;
use netrca_core::constants::MAX_HOPS_LIMIT;
use netrca_core::models::{Edge, NodeId, Relation};
use serde::{Deserialize, Serialize};

use super::cancellation::Cancellable;
use super::frontier::{rank_paths, Candidate};
use super::scoring::{extend_score, EdgeScorer};
use super::{CausalPath, Termination, TraversalOutcome, TraversalQuery};
use crate::store::{Direction, GraphStore};

/// Lifecycle of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    Expanding,
    Terminated(Termination),
}

/// Limits after applying query overrides to the engine config.
#[derive(Debug, Clone, Copy)]
struct SearchLimits {
    max_hops: usize,
    max_paths: usize,
    min_edge_score: f64,
    exhaustive: bool,
}

pub struct Search<'a> {
    store: &'a GraphStore,
    scorer: EdgeScorer,
    limits: SearchLimits,
    direction: Direction,
    relations: Option<BTreeSet<Relation>>,
    seeds: Vec<NodeId>,
    targets: BTreeSet<NodeId>,
    /// Whether the query named targets at all (even unknown ones).
    targeted: bool,
    state: SearchState,
    frontier: BinaryHeap<Candidate>,
    /// Non-dominated `(hops, score)` pairs recorded per node. A path is
    /// dominated when another reaches the same node in no more hops with at
    /// least its score.
    best: HashMap<NodeId, Vec<(usize, f64)>>,
    /// Nodes already emitted as a path terminal.
    emitted: BTreeSet<NodeId>,
    found: Vec<CausalPath>,
    hop_limited: bool,
    expansions: usize,
}

impl<'a> Search<'a> {
    pub fn new(
        store: &'a GraphStore,
        scorer: EdgeScorer,
        config: &TraversalConfig,
        query: &TraversalQuery,
    ) -> Self {
        let limits = SearchLimits {
            max_hops: query
                .max_hops
                .unwrap_or(config.max_hops)
                .min(MAX_HOPS_LIMIT),
            max_paths: query.max_paths.unwrap_or(config.max_paths).max(1),
            min_edge_score: config.min_edge_score,
            exhaustive: query.exhaustive.unwrap_or(config.exhaustive),
        };

        let seeds: BTreeSet<NodeId> = query.seeds.iter().copied().collect();
        let targets: BTreeSet<NodeId> = query.targets.iter().copied().collect();

        Self {
            store,
            scorer,
            limits,
            direction: query.direction,
            relations: query
                .relations
                .as_ref()
                .map(|r| r.iter().copied().collect()),
            seeds: seeds.into_iter().collect(),
            targeted: !targets.is_empty(),
            targets,
            state: SearchState::Idle,
            frontier: BinaryHeap::new(),
            best: HashMap::new(),
            emitted: BTreeSet::new(),
            found: Vec::new(),
            hop_limited: false,
            expansions: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Seed the frontier and enter `Expanding`. Unknown seeds and targets are
    /// dropped; if nothing usable remains the search terminates `Exhausted`.
    pub fn start(&mut self) {
        if self.state != SearchState::Idle {
            return;
        }

        let store = self.store;
        self.seeds.retain(|&seed| {
            let known = store.contains_node(seed);
            if !known {
                tracing::warn!(seed = %seed, "ignoring unknown seed");
            }
            known
        });
        self.targets.retain(|&target| {
            let known = store.contains_node(target);
            if !known {
                tracing::warn!(target = %target, "ignoring unknown target");
            }
            known
        });

        if self.seeds.is_empty() || (self.targeted && self.targets.is_empty()) {
            self.state = SearchState::Terminated(Termination::Exhausted);
            return;
        }

        // A seed that is also a target stays reachable from the other seeds.
        for seed in self.seeds.clone() {
            if !self.targets.contains(&seed) {
                self.record(seed, 0, 1.0);
            }
            self.frontier.push(Candidate::seed(seed));
        }
        self.state = SearchState::Expanding;
    }

    /// Advance by one frontier pop. `cancel` is polled first.
    pub fn step(&mut self, cancel: Option<&dyn Cancellable>) -> SearchState {
        match self.state {
            SearchState::Idle => {
                self.start();
                return self.state;
            }
            SearchState::Terminated(_) => return self.state,
            SearchState::Expanding => {}
        }

        if cancel.is_some_and(|c| c.is_cancelled()) {
            self.frontier.clear();
            self.state = SearchState::Terminated(Termination::Cancelled);
            return self.state;
        }

        let Some(candidate) = self.frontier.pop() else {
            self.state = SearchState::Terminated(self.drained_termination());
            return self.state;
        };

        let head = candidate.head();
        let hops = candidate.hop_count();
        if !self.limits.exhaustive && self.superseded(head, hops, candidate.score) {
            return self.state;
        }

        if hops > 0 && self.is_goal(head) {
            let first = self.emitted.insert(head);
            if first || self.limits.exhaustive {
                self.found.push(candidate.to_path());
                if self.found.len() >= self.limits.max_paths || self.all_targets_emitted() {
                    self.state = SearchState::Terminated(Termination::Found);
                    return self.state;
                }
            }
            if self.targeted {
                return self.state;
            }
        }

        let options = self.expansion_options(&candidate);
        if hops >= self.limits.max_hops {
            if !options.is_empty() {
                self.hop_limited = true;
            }
            return self.state;
        }

        self.expansions += 1;
        for (neighbor, edge, edge_score) in options {
            let score = extend_score(candidate.score, edge_score);
            if !self.limits.exhaustive {
                if self.dominated(neighbor, hops + 1, score) {
                    continue;
                }
                self.record(neighbor, hops + 1, score);
            }
            self.frontier
                .push(candidate.extend(edge, neighbor, edge_score, score));
        }
        self.state
    }

    /// Drive the search to a terminal state.
    pub fn run(mut self, cancel: Option<&dyn Cancellable>) -> TraversalOutcome {
        while !matches!(self.state, SearchState::Terminated(_)) {
            self.step(cancel);
        }
        self.into_outcome()
    }

    fn into_outcome(mut self) -> TraversalOutcome {
        let termination = match self.state {
            SearchState::Terminated(t) => t,
            _ => self.drained_termination(),
        };
        self.found.sort_by(rank_paths);
        self.found.truncate(self.limits.max_paths);
        tracing::debug!(
            ?termination,
            paths = self.found.len(),
            expansions = self.expansions,
            "search terminated"
        );
        TraversalOutcome {
            termination,
            paths: self.found,
            expansions: self.expansions,
        }
    }

    fn is_goal(&self, node: NodeId) -> bool {
        !self.targeted || self.targets.contains(&node)
    }

    /// Without exhaustive enumeration each target yields one path, so the
    /// search is done once all of them have been emitted.
    fn all_targets_emitted(&self) -> bool {
        self.targeted
            && !self.limits.exhaustive
            && self.targets.iter().all(|t| self.emitted.contains(t))
    }

    fn dominated(&self, node: NodeId, hops: usize, score: f64) -> bool {
        self.best
            .get(&node)
            .is_some_and(|front| front.iter().any(|&(h, s)| h <= hops && s >= score))
    }

    /// Strictly dominated by a path recorded after this one was queued.
    fn superseded(&self, node: NodeId, hops: usize, score: f64) -> bool {
        self.best.get(&node).is_some_and(|front| {
            front
                .iter()
                .any(|&(h, s)| h <= hops && s >= score && (h < hops || s > score))
        })
    }

    fn record(&mut self, node: NodeId, hops: usize, score: f64) {
        let front = self.best.entry(node).or_default();
        front.retain(|&(h, s)| !(hops <= h && score >= s));
        front.push((hops, score));
    }

    fn drained_termination(&self) -> Termination {
        if !self.found.is_empty() {
            Termination::Found
        } else if self.hop_limited {
            Termination::HopLimitReached
        } else {
            Termination::Exhausted
        }
    }

    /// Edges worth following from the candidate's head, one per neighbor.
    ///
    /// Parallel edges to the same neighbor are scored independently and the
    /// best label wins (lowest edge id on ties). Neighbors already on the
    /// candidate path are skipped (cycle guard). Ordered by neighbor id.
    fn expansion_options(&self, candidate: &Candidate) -> Vec<(NodeId, &'a Edge, f64)> {
        let head = candidate.head();
        let mut per_neighbor: BTreeMap<NodeId, (&'a Edge, f64)> = BTreeMap::new();

        for edge in self.store.incident_edges(head, self.direction) {
            if let Some(relations) = &self.relations {
                if !relations.contains(&edge.relation) {
                    continue;
                }
            }
            let neighbor = edge.opposite(head);
            if candidate.contains(neighbor) {
                continue;
            }
            let edge_score = self.scorer.edge_score(edge);
            if edge_score < self.limits.min_edge_score {
                continue;
            }
            per_neighbor
                .entry(neighbor)
                .and_modify(|current| {
                    if edge_score > current.1 {
                        *current = (edge, edge_score);
                    }
                })
                .or_insert((edge, edge_score));
        }

        per_neighbor
            .into_iter()
            .map(|(neighbor, (edge, score))| (neighbor, edge, score))
            .collect()
    }
}
