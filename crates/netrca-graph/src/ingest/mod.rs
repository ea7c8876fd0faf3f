//! Ingestion batch: the single logical writer.
//!
//! Extraction collaborators hand over normalized entity and relationship
//! tuples; the batch resolves them through its registry into its store.
//! Input that fails validation is rejected before anything is touched. An
//! integrity violation (duplicate id, dangling reference) poisons the batch:
//! every later call and `commit` fail, so a corrupted graph never becomes a
//! snapshot.

use netrca_core::config::{RegistryConfig, ScoringConfig};
use netrca_core::constants::{CANONICAL_NAME_KEY, MENTIONS_KEY};
use netrca_core::models::{
    check_unit, Edge, EdgeEvidence, EdgeId, EdgeWeights, NodeId, Properties, PropertyValue,
    Relation,
};
use netrca_core::{GraphError, RcaConfig, RcaError, RcaResult};
use serde::{Deserialize, Serialize};

use crate::registry::EntityRegistry;
use crate::snapshot::GraphSnapshot;
use crate::store::GraphStore;

/// A normalized entity mention from an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl EntityMention {
    pub fn new(entity_type: &str, name: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            name: name.to_string(),
            properties: Properties::new(),
        }
    }
}

/// A normalized relationship assertion from an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipTuple {
    pub source_type: String,
    pub source_name: String,
    pub relation: String,
    pub target_type: String,
    pub target_name: String,
    pub source_confidence: f64,
    /// Falls back to `scoring.default_topological_weight`.
    #[serde(default)]
    pub topological_weight: Option<f64>,
    /// Falls back to `scoring.default_semantic_weight` until scored.
    #[serde(default)]
    pub semantic_weight: Option<f64>,
    #[serde(default)]
    pub evidence: Vec<EdgeEvidence>,
}

pub struct IngestBatch {
    store: GraphStore,
    registry: EntityRegistry,
    scoring: ScoringConfig,
    aborted: Option<String>,
}

impl IngestBatch {
    pub fn new(config: &RcaConfig) -> Self {
        Self::with_configs(config.registry.clone(), config.scoring.clone())
    }

    pub fn with_configs(registry: RegistryConfig, scoring: ScoringConfig) -> Self {
        Self {
            store: GraphStore::new(),
            registry: EntityRegistry::with_config(registry),
            scoring,
            aborted: None,
        }
    }

    /// Start the next batch from a copy of a committed snapshot. The old
    /// snapshot keeps serving reads until the new one is committed.
    pub fn from_snapshot(snapshot: &GraphSnapshot, scoring: ScoringConfig) -> Self {
        Self {
            store: snapshot.store().clone(),
            registry: snapshot.registry().clone(),
            scoring,
            aborted: None,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    pub fn abort_reason(&self) -> Option<&str> {
        self.aborted.as_deref()
    }

    /// Resolve a normalized name to its canonical node.
    pub fn resolve(&mut self, entity_type: &str, name: &str) -> RcaResult<NodeId> {
        self.guarded(|batch| batch.registry.resolve(&mut batch.store, entity_type, name))
    }

    /// Resolve a mention and merge its properties into the canonical node.
    /// Each call bumps the node's `mentions` counter.
    pub fn ingest_entity(&mut self, mention: &EntityMention) -> RcaResult<NodeId> {
        self.ensure_open()?;
        let entity_type = self.registry.parse_type(&mention.entity_type)?;
        for (key, value) in &mention.properties {
            if key == CANONICAL_NAME_KEY {
                return Err(GraphError::InvalidProperty {
                    key: key.clone(),
                    reason: "canonical_name is derived from the mention name".to_string(),
                }
                .into());
            }
            value.validate(key)?;
        }

        self.guarded(|batch| {
            let id = batch
                .registry
                .resolve_typed(&mut batch.store, entity_type, &mention.name)?;
            for (key, value) in &mention.properties {
                batch.store.set_node_property(id, key, value.clone())?;
            }
            let mentions = batch
                .store
                .get_node(id)
                .and_then(|n| n.property(MENTIONS_KEY))
                .and_then(PropertyValue::as_integer)
                .unwrap_or(0);
            batch
                .store
                .set_node_property(id, MENTIONS_KEY, PropertyValue::Integer(mentions + 1))?;
            Ok(id)
        })
    }

    /// Resolve both endpoints and record the relationship.
    ///
    /// A repeated `(source, target, relation)` merges into the existing edge
    /// (stronger confidence wins, evidence is appended) instead of creating a
    /// parallel duplicate. Weights the repeat leaves out keep their recorded
    /// values. A different label creates a parallel edge.
    pub fn ingest_relationship(&mut self, tuple: &RelationshipTuple) -> RcaResult<EdgeId> {
        self.ensure_open()?;
        let relation =
            Relation::from_str_name(&tuple.relation).ok_or_else(|| GraphError::InvalidRelation {
                label: tuple.relation.clone(),
            })?;
        let source_type = self.registry.parse_type(&tuple.source_type)?;
        let target_type = self.registry.parse_type(&tuple.target_type)?;
        let confidence = check_unit("source_confidence", tuple.source_confidence)?;
        // Only an explicit weight may raise a merged edge's topological weight.
        let asserted_topological = tuple
            .topological_weight
            .map(|t| check_unit("topological", t))
            .transpose()?;
        let topological = check_unit(
            "topological",
            asserted_topological.unwrap_or(self.scoring.default_topological_weight),
        )?;
        let semantic = check_unit(
            "semantic",
            tuple
                .semantic_weight
                .unwrap_or(self.scoring.default_semantic_weight),
        )?;

        self.guarded(|batch| {
            let source =
                batch
                    .registry
                    .resolve_typed(&mut batch.store, source_type, &tuple.source_name)?;
            let target =
                batch
                    .registry
                    .resolve_typed(&mut batch.store, target_type, &tuple.target_name)?;

            if let Some(existing) = batch.store.find_edge(source, target, relation).map(|e| e.id) {
                batch
                    .store
                    .merge_edge_support(
                        existing,
                        confidence,
                        asserted_topological,
                        &tuple.evidence,
                    )?;
                if tuple.semantic_weight.is_some() {
                    batch.store.set_semantic_weight(existing, semantic)?;
                }
                tracing::debug!(edge = %existing, %relation, "relationship merged into existing edge");
                return Ok(existing);
            }

            let id = batch.store.next_edge_id();
            let weights = EdgeWeights::new(topological, semantic, confidence)?;
            let edge = Edge::new(id, source, target, relation, weights)
                .with_evidence(tuple.evidence.clone());
            Ok(batch.store.add_edge(edge)?)
        })
    }

    /// Insert a fully-formed edge (ids chosen by the caller).
    pub fn add_edge(&mut self, edge: Edge) -> RcaResult<EdgeId> {
        self.guarded(|batch| Ok(batch.store.add_edge(edge)?))
    }

    /// Apply a similarity score from the embedding collaborator.
    pub fn set_semantic_weight(&mut self, edge: EdgeId, score: f64) -> RcaResult<()> {
        self.guarded(|batch| Ok(batch.store.set_semantic_weight(edge, score)?))
    }

    /// Freeze store and registry into a snapshot. Fails if the batch was poisoned.
    pub fn commit(self) -> RcaResult<GraphSnapshot> {
        if let Some(reason) = self.aborted {
            tracing::warn!(%reason, "refusing to commit aborted batch");
            return Err(RcaError::BatchAborted { reason });
        }
        tracing::info!(
            nodes = self.store.node_count(),
            edges = self.store.edge_count(),
            entities = self.registry.len(),
            "ingestion batch committed"
        );
        Ok(GraphSnapshot::new(self.store, self.registry))
    }

    fn ensure_open(&self) -> RcaResult<()> {
        match &self.aborted {
            Some(reason) => Err(RcaError::BatchAborted {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> RcaResult<T>) -> RcaResult<T> {
        self.ensure_open()?;
        let result = op(self);
        if let Err(e) = &result {
            if is_integrity_violation(e) {
                tracing::warn!(error = %e, "integrity violation, aborting ingestion batch");
                self.aborted = Some(e.to_string());
            }
        }
        result
    }
}

fn is_integrity_violation(error: &RcaError) -> bool {
    matches!(
        error,
        RcaError::Graph(
            GraphError::DuplicateNodeId { .. }
                | GraphError::DuplicateEdgeId { .. }
                | GraphError::DanglingReference { .. }
                | GraphError::MissingCanonicalName { .. }
        )
    )
}
