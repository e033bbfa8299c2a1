//! The beta controller: per-group reliability scoring and the adaptive
//! KL-coefficient schedule built on top of it.

pub mod beta;
pub mod reliability;

pub use beta::BetaKlController;
pub use reliability::{group_reliability, normalized_effective_size, sign_balance};
