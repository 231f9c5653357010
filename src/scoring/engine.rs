use serde::Serialize;

use super::constants::lookup;
use super::input::{BiometricInput, Metric};
use super::normalize::normalize;
use crate::error::ScoringError;

const LBS_TO_KG: f64 = 0.453592;
const INCHES_TO_M: f64 = 0.0254;

/// BMI that earns a full BMI score; each point away costs `BMI_PENALTY`.
const BMI_TARGET: f64 = 22.0;
const BMI_PENALTY: f64 = 5.0;

/// Heart-rate headroom below `rhr_base` that earns a full RHR score.
const RHR_SPAN: f64 = 60.0;
/// VO2 max above `vo2_offset` that earns a full VO2 score.
const VO2_SPAN: f64 = 25.0;

/// Age reported for a fitness score of zero, and the years a perfect score removes.
const AGE_CEILING: f64 = 80.0;
const AGE_RANGE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    pub hrv: f64,
    pub rhr: f64,
    pub body_fat: f64,
    /// Floored at zero but not capped at 100.
    pub bmi: f64,
    pub vo2: f64,
}

impl SubScores {
    fn mean(&self) -> f64 {
        (self.hrv + self.rhr + self.body_fat + self.bmi + self.vo2) / 5.0
    }
}

#[derive(Debug, Clone)]
pub struct ComponentContribution {
    pub label: &'static str, // e.g. "HRV", "BMI"
    pub raw: String,         // e.g. "87 ms", "26.3"
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub fitness_score: f64,
    pub biological_age: f64,
    pub bmi: f64,
    pub sub_scores: SubScores,
    input: BiometricInput,
}

impl ScoreResult {
    pub fn input(&self) -> &BiometricInput {
        &self.input
    }

    /// Per-component view of the score, in the order the components are computed.
    pub fn breakdown(&self) -> Vec<ComponentContribution> {
        let raw = |metric: Metric| {
            format!("{} {}", trim_float(self.input.value(metric)), metric.unit())
        };
        vec![
            ComponentContribution {
                label: Metric::Hrv.label(),
                raw: raw(Metric::Hrv),
                score: self.sub_scores.hrv,
            },
            ComponentContribution {
                label: Metric::Rhr.label(),
                raw: raw(Metric::Rhr),
                score: self.sub_scores.rhr,
            },
            ComponentContribution {
                label: Metric::BodyFat.label(),
                raw: raw(Metric::BodyFat),
                score: self.sub_scores.body_fat,
            },
            ComponentContribution {
                label: "BMI",
                raw: format!("{:.1}", self.bmi),
                score: self.sub_scores.bmi,
            },
            ComponentContribution {
                label: Metric::Vo2Max.label(),
                raw: raw(Metric::Vo2Max),
                score: self.sub_scores.vo2,
            },
        ]
    }
}

/// Body mass index from imperial height and weight.
pub fn body_mass_index(weight_lbs: f64, height_inches: f64) -> f64 {
    let weight_kg = weight_lbs * LBS_TO_KG;
    let height_m = height_inches * INCHES_TO_M;
    weight_kg / height_m.powi(2)
}

/// Score a set of biometrics.
///
/// The five sub-scores are averaged with equal weight. The BMI score is only
/// floored at zero, never clamped above; it cannot exceed 100 for finite
/// height and weight since the penalty term is non-negative.
pub fn compute_score(input: &BiometricInput) -> Result<ScoreResult, ScoringError> {
    let c = lookup(input.sex);

    let bmi = body_mass_index(input.weight_lbs, input.height_inches);

    let sub_scores = SubScores {
        hrv: normalize(input.hrv, c.hrv_min, c.hrv_max)?,
        rhr: normalize(c.rhr_base - input.rhr, 0.0, RHR_SPAN)?,
        body_fat: normalize(c.bf_base - input.body_fat_pct, 0.0, c.bf_min)?,
        bmi: (100.0 - (bmi - BMI_TARGET).abs() * BMI_PENALTY).max(0.0),
        vo2: normalize(input.vo2_max - c.vo2_offset, 0.0, VO2_SPAN)?,
    };

    let fitness_score = sub_scores.mean();
    let biological_age = AGE_CEILING - (fitness_score / 100.0 * AGE_RANGE);

    tracing::debug!(
        sex = %input.sex,
        bmi,
        fitness_score,
        biological_age,
        "computed score"
    );

    Ok(ScoreResult {
        fitness_score,
        biological_age,
        bmi,
        sub_scores,
        input: *input,
    })
}

/// Render a float without a trailing ".0" (87.0 -> "87", 12.5 -> "12.5").
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
