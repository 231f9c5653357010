use thiserror::Error;

/// Failures surfaced by the scoring engine.
///
/// Neither variant is recoverable inside a computation: the call that hits
/// one returns it and produces no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Sex was not one of the recognized values ("male", "female").
    #[error("invalid sex '{0}': expected 'male' or 'female'")]
    InvalidSex(String),

    /// `normalize` was called with an empty range, which has no defined result.
    #[error("degenerate range: min and max are both {min}")]
    DegenerateRange { min: f64, max: f64 },
}
