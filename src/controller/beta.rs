//! Adaptive KL-coefficient controller.
//!
//! Implements the dynamic beta schedule:
//!
//!   s_batch = mean over prompt groups of the group reliability score
//!   beta_t  = beta_max - (beta_max - beta_min) * s_batch
//!
//! optionally EMA-smoothed against the previous value. High batch
//! reliability relaxes the KL penalty toward `beta_min` (the reward signal
//! can be trusted to drive exploration); low reliability pins it near
//! `beta_max` (stay close to the reference policy).

use std::collections::HashMap;
use std::hash::Hash;

use anyhow::{bail, Result};
use tracing::debug;

use crate::config::ControllerConfig;

use super::reliability::group_reliability;

/// The stateful beta controller.
///
/// One instance is owned by the training loop and updated once per step.
/// Each update is a synchronous read-modify-write over the current value;
/// callers issuing updates from multiple workers must serialize them (e.g.
/// behind a `Mutex`) so readers never observe a partially applied step.
#[derive(Debug, Clone)]
pub struct BetaKlController {
    beta_min: f64,
    beta_max: f64,
    eps: f64,
    ema_alpha: Option<f64>,
    value: f64,
}

impl BetaKlController {
    /// Create a controller from a validated configuration.
    ///
    /// The initial value is `beta_max`: maximal regularization until the
    /// first batch provides evidence the reward signal is reliable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`ControllerConfig::validate`].
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            beta_min: config.beta_min,
            beta_max: config.beta_max,
            eps: config.eps,
            ema_alpha: config.ema_alpha,
            value: config.beta_max,
        })
    }

    /// The current KL coefficient.
    ///
    /// Always inside `[beta_min, beta_max]` after every completed update.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Recompute the coefficient from one batch of per-rollout rewards.
    ///
    /// `rewards` holds one scalar outcome reward per rollout (token-level
    /// signals pre-summed by the caller) and `group_ids` the aligned prompt
    /// identifier for each rollout; rollouts sharing an id form one group.
    ///
    /// An empty batch carries no signal and leaves the value unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error when `rewards` and `group_ids` have different
    /// lengths. Misaligned inputs are a programming error in the caller,
    /// never silently truncated.
    pub fn update<K>(&mut self, rewards: &[f64], group_ids: &[K]) -> Result<()>
    where
        K: Eq + Hash,
    {
        if rewards.len() != group_ids.len() {
            bail!(
                "rewards/group_ids length mismatch: {} vs {}",
                rewards.len(),
                group_ids.len()
            );
        }
        if rewards.is_empty() {
            return Ok(());
        }

        // Partition rollout indices by prompt id.
        let mut groups: HashMap<&K, Vec<usize>> = HashMap::new();
        for (i, id) in group_ids.iter().enumerate() {
            groups.entry(id).or_default().push(i);
        }

        // Score each group and average into the batch-level reliability.
        let mut score_sum = 0.0;
        let mut num_groups = 0usize;
        for indices in groups.values() {
            let group_rewards: Vec<f64> = indices.iter().map(|&i| rewards[i]).collect();
            score_sum += group_reliability(&group_rewards, self.eps);
            num_groups += 1;
        }
        let s_batch = if num_groups == 0 {
            0.0
        } else {
            score_sum / num_groups as f64
        };

        // Map reliability to the coefficient range; the clamp guards against
        // floating-point overshoot at the boundaries.
        let beta_t = (self.beta_max - (self.beta_max - self.beta_min) * s_batch)
            .clamp(self.beta_min, self.beta_max);

        self.value = match self.ema_alpha {
            Some(a) => a * self.value + (1.0 - a) * beta_t,
            None => beta_t,
        };

        debug!(
            s_batch,
            beta_t,
            value = self.value,
            num_groups,
            batch_size = rewards.len(),
            "Beta controller updated"
        );

        Ok(())
    }
}
