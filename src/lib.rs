//! Dynamic β-schedule KL controller for group-relative RL training.
//!
//! Once per training step the controller consumes the batch of per-rollout
//! outcome rewards, grouped by prompt, and produces a single KL-penalty
//! coefficient in a configured `[beta_min, beta_max]` range: batches whose
//! reward signal looks reliable (balanced sign split, spread-out positive
//! advantage mass) push beta down toward `beta_min`, degenerate batches push
//! it back up toward `beta_max`.

pub mod advantage;
pub mod config;
pub mod controller;
pub mod reward;
pub mod sim;
