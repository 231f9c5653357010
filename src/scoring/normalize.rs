use crate::error::ScoringError;

/// Map `value` linearly from `[min, max]` onto `[0, 100]`, clamping the result.
///
/// `min == max` has no meaningful answer and is reported as
/// [`ScoringError::DegenerateRange`].
pub fn normalize(value: f64, min: f64, max: f64) -> Result<f64, ScoringError> {
    if min == max {
        return Err(ScoringError::DegenerateRange { min, max });
    }
    let scaled = (value - min) / (max - min) * 100.0;
    Ok(scaled.clamp(0.0, 100.0))
}
