pub mod constants;
pub mod engine;
pub mod input;
pub mod normalize;
pub mod validation;

pub use constants::{lookup, lookup_str, ScoringConstants};
pub use engine::{body_mass_index, compute_score, ComponentContribution, ScoreResult, SubScores};
pub use input::{BiometricInput, InputDomain, Metric, Sex};
pub use normalize::normalize;
pub use validation::validate_input;
