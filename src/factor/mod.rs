//! Nonnegative matrix factorization under Euclidean distance, A ≈ W * H.

pub mod nmf;
pub mod update_rules;

pub use nmf::{factorize, factorize_from, FactorizationConfig, FactorizationResult};
