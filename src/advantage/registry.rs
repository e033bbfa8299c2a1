//! Lookup-by-name table for advantage estimators.
//!
//! The host trainer names its estimator in configuration (e.g.
//! `adv_estimator: raw_reward`) and resolves it here at startup.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use tracing::warn;

use super::{compute_raw_reward_advantage, AdvantageOutput};

/// Signature every registered estimator satisfies.
pub type AdvantageEstimatorFn =
    fn(token_level_rewards: &[Vec<f64>], response_mask: &[Vec<f64>]) -> Result<AdvantageOutput>;

/// Name -> estimator table.
pub struct AdvantageRegistry {
    estimators: HashMap<String, AdvantageEstimatorFn>,
}

impl AdvantageRegistry {
    /// An empty registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            estimators: HashMap::new(),
        }
    }

    /// Register an estimator under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &str, estimator: AdvantageEstimatorFn) {
        if self.estimators.insert(name.to_string(), estimator).is_some() {
            warn!(name, "Replacing previously registered advantage estimator");
        }
    }

    /// Resolve an estimator by name.
    ///
    /// # Errors
    ///
    /// Returns an error naming the unknown estimator and listing the
    /// available ones.
    pub fn get(&self, name: &str) -> Result<AdvantageEstimatorFn> {
        self.estimators.get(name).copied().ok_or_else(|| {
            let mut known = self.names();
            known.sort_unstable();
            anyhow!("Unknown advantage estimator '{name}' (available: {known:?})")
        })
    }

    /// Names of all registered estimators, in arbitrary order.
    pub fn names(&self) -> Vec<String> {
        self.estimators.keys().cloned().collect()
    }
}

impl Default for AdvantageRegistry {
    /// A registry with the built-in estimators pre-registered.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("raw_reward", compute_raw_reward_advantage);
        registry
    }
}
