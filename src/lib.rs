pub mod config;
pub mod error;
pub mod output;
pub mod scoring;

pub use error::ScoringError;
pub use scoring::{compute_score, BiometricInput, ScoreResult, Sex};
