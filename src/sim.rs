//! Synthetic-batch driver for the beta controller.
//!
//! Generates grouped binary-reward batches the way a GRPO rollout phase
//! would: each batch holds several prompt groups, each group samples G
//! binary outcomes from a per-group success probability drawn around a base
//! rate that drifts upward over the run (a training curve). Early batches
//! are mostly degenerate (all failures), so beta should start pinned at
//! `beta_max` and relax as the success rate approaches 50%.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::{ControllerConfig, SimConfig};
use crate::controller::BetaKlController;

/// One simulated step's outputs.
#[derive(Debug, Clone)]
pub struct SimStep {
    pub step: usize,
    /// Fraction of successful rollouts in the batch.
    pub success_rate: f64,
    /// Controller value after the update.
    pub beta: f64,
}

/// Run the controller over `config.steps` synthetic batches.
pub fn run(controller_config: &ControllerConfig, config: &SimConfig) -> Result<Vec<SimStep>> {
    let mut controller = BetaKlController::new(controller_config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut trace = Vec::with_capacity(config.steps);

    for step in 0..config.steps {
        // Base success rate ramps from ~5% to ~60% over the run.
        let progress = if config.steps > 1 {
            step as f64 / (config.steps - 1) as f64
        } else {
            0.0
        };
        let base_rate = 0.05 + 0.55 * progress;

        let batch_size = config.groups_per_batch * config.group_size;
        let mut rewards = Vec::with_capacity(batch_size);
        let mut group_ids = Vec::with_capacity(batch_size);
        let mut successes = 0usize;

        for group in 0..config.groups_per_batch {
            let spread = config.success_spread;
            let p = (base_rate + rng.gen_range(-spread..=spread)).clamp(0.0, 1.0);
            for _ in 0..config.group_size {
                let reward = if rng.gen_bool(p) { 1.0 } else { 0.0 };
                if reward > 0.0 {
                    successes += 1;
                }
                rewards.push(reward);
                group_ids.push(group);
            }
        }

        controller.update(&rewards, &group_ids)?;

        let success_rate = successes as f64 / rewards.len() as f64;
        let beta = controller.value();
        info!(step, success_rate, beta, "Simulated training step");
        trace.push(SimStep {
            step,
            success_rate,
            beta,
        });
    }

    Ok(trace)
}
