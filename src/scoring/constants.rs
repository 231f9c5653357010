use super::input::Sex;
use crate::error::ScoringError;

/// Sex-specific bounds feeding the sub-score normalizations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConstants {
    pub hrv_min: f64,
    pub hrv_max: f64,
    /// Resting heart rate at which the RHR score bottoms out.
    pub rhr_base: f64,
    /// Body fat percentage at which the body fat score bottoms out.
    pub bf_base: f64,
    /// Percentage points below `bf_base` needed for a full body fat score.
    pub bf_min: f64,
    /// VO2 max at which the VO2 score starts counting.
    pub vo2_offset: f64,
}

pub static MALE: ScoringConstants = ScoringConstants {
    hrv_min: 20.0,
    hrv_max: 100.0,
    rhr_base: 100.0,
    bf_base: 25.0,
    bf_min: 15.0,
    vo2_offset: 30.0,
};

pub static FEMALE: ScoringConstants = ScoringConstants {
    hrv_min: 10.0,
    hrv_max: 90.0,
    rhr_base: 105.0,
    bf_base: 30.0,
    bf_min: 12.0,
    vo2_offset: 25.0,
};

pub fn lookup(sex: Sex) -> &'static ScoringConstants {
    match sex {
        Sex::Male => &MALE,
        Sex::Female => &FEMALE,
    }
}

/// Text-keyed lookup. Anything other than "male"/"female" is `InvalidSex`.
pub fn lookup_str(sex: &str) -> Result<&'static ScoringConstants, ScoringError> {
    Ok(lookup(sex.parse()?))
}
