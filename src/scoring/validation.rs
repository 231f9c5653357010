use super::input::{BiometricInput, Metric};

/// Check every numeric input against its accepted domain.
/// Returns all validation errors at once (not just the first).
///
/// The scoring engine itself accepts any value; this is for callers that
/// collect input from people and want to reject typos before scoring.
pub fn validate_input(input: &BiometricInput) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for metric in Metric::ALL {
        let value = input.value(metric);
        let domain = metric.domain();

        if !value.is_finite() {
            errors.push(format!("{}: must be a finite number", metric.key()));
        } else if !domain.contains(value) {
            errors.push(format!(
                "{}: {} is outside {}..={} {}",
                metric.key(),
                value,
                domain.min,
                domain.max,
                metric.unit()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
