use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Complete configuration for the dynamic beta-schedule tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynBetaConfig {
    pub controller: ControllerConfig,
    pub sim: SimConfig,
}

/// Beta controller configuration.
///
/// Validated once, at controller construction time; a misconfigured range or
/// smoothing weight is rejected before any training step runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Lower bound for the KL coefficient (default: 0.0).
    pub beta_min: f64,
    /// Upper bound for the KL coefficient; also the initial value (default: 0.1).
    pub beta_max: f64,
    /// Numerical-stability threshold for the positive-mass guard (default: 1e-8).
    pub eps: f64,
    /// EMA smoothing weight on the previous value, in [0, 1]. `None` disables
    /// smoothing and the freshly computed beta replaces the old value outright.
    pub ema_alpha: Option<f64>,
}

/// Synthetic-batch simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of training steps to simulate (default: 50).
    pub steps: usize,
    /// Number of prompt groups per batch (default: 8).
    pub groups_per_batch: usize,
    /// Rollouts per group, G (default: 8).
    pub group_size: usize,
    /// Half-width of the per-group success-probability band around the
    /// drifting base rate (default: 0.2).
    pub success_spread: f64,
    /// RNG seed for reproducible runs (default: 42).
    pub seed: u64,
}

impl ControllerConfig {
    /// Check the structural invariants the controller relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are non-finite or inverted, if `eps`
    /// is not strictly positive, or if `ema_alpha` falls outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !self.beta_min.is_finite() || !self.beta_max.is_finite() {
            bail!(
                "beta bounds must be finite, got [{}, {}]",
                self.beta_min,
                self.beta_max
            );
        }
        if self.beta_min > self.beta_max {
            bail!(
                "beta_min ({}) must not exceed beta_max ({})",
                self.beta_min,
                self.beta_max
            );
        }
        if !(self.eps > 0.0) {
            bail!("eps must be strictly positive, got {}", self.eps);
        }
        if let Some(a) = self.ema_alpha {
            if !(0.0..=1.0).contains(&a) {
                bail!("ema_alpha must lie in [0, 1], got {a}");
            }
        }
        Ok(())
    }
}

impl Default for DynBetaConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            beta_min: 0.0,
            beta_max: 0.1,
            eps: 1e-8,
            ema_alpha: None,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            groups_per_batch: 8,
            group_size: 8,
            success_spread: 0.2,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = ControllerConfig {
            beta_min: 0.5,
            beta_max: 0.1,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_bounds_accepted() {
        let config = ControllerConfig {
            beta_min: 0.1,
            beta_max: 0.1,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nonpositive_eps_rejected() {
        let config = ControllerConfig {
            eps: 0.0,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ControllerConfig {
            eps: -1e-8,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ema_alpha_out_of_range_rejected() {
        for bad in [-0.1, 1.1, f64::NAN] {
            let config = ControllerConfig {
                ema_alpha: Some(bad),
                ..ControllerConfig::default()
            };
            assert!(config.validate().is_err(), "ema_alpha = {bad} should fail");
        }
    }

    #[test]
    fn test_ema_alpha_boundaries_accepted() {
        for ok in [0.0, 0.5, 1.0] {
            let config = ControllerConfig {
                ema_alpha: Some(ok),
                ..ControllerConfig::default()
            };
            assert!(config.validate().is_ok(), "ema_alpha = {ok} should pass");
        }
    }

    #[test]
    fn test_nonfinite_bounds_rejected() {
        let config = ControllerConfig {
            beta_max: f64::INFINITY,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = DynBetaConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DynBetaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.controller.beta_max, config.controller.beta_max);
        assert_eq!(parsed.sim.steps, config.sim.steps);
    }
}
