//! Advantage estimation.
//!
//! The raw-reward estimator broadcasts each rollout's scalar outcome reward
//! across its response tokens with no mean subtraction and no whitening; the
//! group-relative shaping happens entirely through the KL schedule, not
//! through the advantage. Estimators are resolved by name through
//! [`AdvantageRegistry`] so the host trainer can pick one from its config.

pub mod registry;

use anyhow::{bail, Result};

pub use registry::{AdvantageEstimatorFn, AdvantageRegistry};

/// Token-level advantages and returns for one batch.
pub type AdvantageOutput = (Vec<Vec<f64>>, Vec<Vec<f64>>);

/// Raw-reward advantage: `A_{i,t} = (sum_t r_{i,t}) * mask_{i,t}`.
///
/// `token_level_rewards` is a `(bs, resp_len)` matrix; outcome rewards are
/// typically nonzero only at the final token, so the row sum recovers the
/// scalar reward. `response_mask` zeroes positions outside the response.
/// Returns equal advantages for outcome-reward training.
///
/// # Errors
///
/// Returns an error when the two matrices disagree in batch size or any row
/// disagrees in width.
pub fn compute_raw_reward_advantage(
    token_level_rewards: &[Vec<f64>],
    response_mask: &[Vec<f64>],
) -> Result<AdvantageOutput> {
    if token_level_rewards.len() != response_mask.len() {
        bail!(
            "token_level_rewards/response_mask batch size mismatch: {} vs {}",
            token_level_rewards.len(),
            response_mask.len()
        );
    }

    let mut advantages = Vec::with_capacity(token_level_rewards.len());
    for (i, (row, mask)) in token_level_rewards.iter().zip(response_mask).enumerate() {
        if row.len() != mask.len() {
            bail!(
                "row {i} width mismatch: rewards {} vs mask {}",
                row.len(),
                mask.len()
            );
        }
        let score: f64 = row.iter().sum();
        advantages.push(mask.iter().map(|&m| score * m).collect::<Vec<f64>>());
    }

    let returns = advantages.clone();
    Ok((advantages, returns))
}
