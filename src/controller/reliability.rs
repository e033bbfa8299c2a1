//! Per-group reliability scoring.
//!
//! For a group of G rollouts with scalar rewards r_1..r_G sampled for the
//! same prompt:
//!
//!   g_i      = r_i - mean(r)
//!   p        = (1/G) * #{ g_i > 0 }
//!   R_i      = relu(g_i) / sum_j relu(g_j)     (when positive mass exists)
//!   n_eff    = 1 / sum_i R_i^2
//!   tilde_n  = n_eff / G
//!   s        = 4 p (1 - p) * tilde_n
//!
//! The score s lies in [0, 1] and is high only when the group has both a
//! balanced split of rollouts above/below its own mean and positive advantage
//! mass spread across several rollouts rather than concentrated in one.

/// The bell-shaped sign-balance factor `4 p (1 - p)`.
///
/// Zero at the degenerate extremes `p = 0` and `p = 1`, maximal (= 1) at
/// `p = 0.5`, the most informative split for a policy-gradient advantage.
pub fn sign_balance(p: f64) -> f64 {
    4.0 * p * (1.0 - p)
}

/// Normalized effective sample size of the rectified-deviation distribution.
///
/// `pos` holds the rectified deviations `relu(g_i)` and `pos_sum` their sum,
/// which the caller has already checked to be above the stability threshold.
/// The inverse participation ratio `1 / sum R_i^2` of the normalized
/// distribution `R_i = pos_i / pos_sum` counts how many rollouts effectively
/// carry the positive mass: 1 when a single rollout dominates, G when it is
/// spread evenly. Dividing by G yields a value in (0, 1].
pub fn normalized_effective_size(pos: &[f64], pos_sum: f64) -> f64 {
    let sum_sq: f64 = pos.iter().map(|&v| (v / pos_sum).powi(2)).sum();
    let n_eff = 1.0 / sum_sq;
    n_eff / pos.len() as f64
}

/// Compute the reliability score for one prompt group.
///
/// # Edge cases
///
/// - An empty group scores 0.0.
/// - A group of size 1 scores 0.0: the single reward equals its own mean, so
///   `p = 0` and the sign-balance factor vanishes.
/// - A zero-variance group (all rewards identical) scores 0.0: no centered
///   value exceeds zero, so `pos_sum <= eps` and the effective sample size
///   contributes nothing.
pub fn group_reliability(rewards: &[f64], eps: f64) -> f64 {
    let g = rewards.len();
    if g == 0 {
        return 0.0;
    }

    let mean = rewards.iter().sum::<f64>() / g as f64;
    let centered: Vec<f64> = rewards.iter().map(|r| r - mean).collect();

    let p = centered.iter().filter(|&&v| v > 0.0).count() as f64 / g as f64;

    let pos: Vec<f64> = centered.iter().map(|&v| v.max(0.0)).collect();
    let pos_sum: f64 = pos.iter().sum();

    let tilde_n = if pos_sum <= eps {
        // No positive advantage mass: the group carries no usable signal.
        0.0
    } else {
        normalized_effective_size(&pos, pos_sum)
    };

    sign_balance(p) * tilde_n
}
