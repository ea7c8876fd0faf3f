//! Layered configuration. Every section falls back to `defaults` for missing keys.

pub mod defaults;
mod observability_config;
mod registry_config;
mod scoring_config;
mod traversal_config;

use serde::{Deserialize, Serialize};

pub use observability_config::ObservabilityConfig;
pub use registry_config::RegistryConfig;
pub use scoring_config::ScoringConfig;
pub use traversal_config::TraversalConfig;

use crate::constants::MAX_HOPS_LIMIT;
use crate::errors::{RcaError, RcaResult};

/// Top-level configuration for the reasoning engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcaConfig {
    pub registry: RegistryConfig,
    pub scoring: ScoringConfig,
    pub traversal: TraversalConfig,
    pub observability: ObservabilityConfig,
}

impl RcaConfig {
    /// Parse from TOML and validate. An empty document yields all defaults.
    pub fn from_toml(source: &str) -> RcaResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| RcaError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RcaResult<()> {
        let s = &self.scoring;
        for (name, value) in [
            ("scoring.topological_weight", s.topological_weight),
            ("scoring.semantic_weight", s.semantic_weight),
            ("scoring.source_confidence_weight", s.source_confidence_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config_error(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if s.weight_sum() <= 0.0 {
            return Err(config_error("scoring weights must not all be zero".to_string()));
        }
        for (name, value) in [
            ("scoring.default_semantic_weight", s.default_semantic_weight),
            ("scoring.default_topological_weight", s.default_topological_weight),
            ("traversal.min_edge_score", self.traversal.min_edge_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(config_error(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        let t = &self.traversal;
        if t.max_hops == 0 || t.max_hops > MAX_HOPS_LIMIT {
            return Err(config_error(format!(
                "traversal.max_hops must be within 1..={MAX_HOPS_LIMIT}, got {}",
                t.max_hops
            )));
        }
        if t.max_paths == 0 {
            return Err(config_error("traversal.max_paths must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn config_error(reason: String) -> RcaError {
    RcaError::Config { reason }
}
