use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoringError;

/// Biological sex, which selects the constant table used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("male") {
            Ok(Sex::Male)
        } else if trimmed.eq_ignore_ascii_case("female") {
            Ok(Sex::Female)
        } else {
            Err(ScoringError::InvalidSex(s.to_string()))
        }
    }
}

impl TryFrom<String> for Sex {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One set of raw biometrics, as collected from the user.
///
/// Values are expected to fall inside the ranges reported by
/// [`Metric::domain`], but nothing here enforces that. See
/// [`validate_input`](super::validate_input) for the presentation-side check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiometricInput {
    pub sex: Sex,
    /// Heart rate variability (ms)
    pub hrv: f64,
    /// Resting heart rate (bpm)
    pub rhr: f64,
    pub body_fat_pct: f64,
    pub height_inches: f64,
    pub weight_lbs: f64,
    /// VO2 max (ml/kg/min)
    pub vo2_max: f64,
}

impl Default for BiometricInput {
    fn default() -> Self {
        Self {
            sex: Sex::default(),
            hrv: Metric::Hrv.domain().default,
            rhr: Metric::Rhr.domain().default,
            body_fat_pct: Metric::BodyFat.domain().default,
            height_inches: Metric::Height.domain().default,
            weight_lbs: Metric::Weight.domain().default,
            vo2_max: Metric::Vo2Max.domain().default,
        }
    }
}

impl BiometricInput {
    /// Read a single numeric field.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Hrv => self.hrv,
            Metric::Rhr => self.rhr,
            Metric::BodyFat => self.body_fat_pct,
            Metric::Height => self.height_inches,
            Metric::Weight => self.weight_lbs,
            Metric::Vo2Max => self.vo2_max,
        }
    }
}

/// Accepted range and starting value for one numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputDomain {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl InputDomain {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The numeric inputs of a [`BiometricInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Hrv,
    Rhr,
    BodyFat,
    Height,
    Weight,
    Vo2Max,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Hrv,
        Metric::Rhr,
        Metric::BodyFat,
        Metric::Height,
        Metric::Weight,
        Metric::Vo2Max,
    ];

    pub fn domain(&self) -> InputDomain {
        let (min, max, default) = match self {
            Metric::Hrv => (20.0, 120.0, 87.0),
            Metric::Rhr => (30.0, 100.0, 52.0),
            Metric::BodyFat => (5.0, 40.0, 12.0),
            Metric::Height => (48.0, 84.0, 72.0),
            Metric::Weight => (80.0, 300.0, 194.0),
            Metric::Vo2Max => (20.0, 70.0, 50.0),
        };
        InputDomain { min, max, default }
    }

    /// Field name as it appears in profiles and JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Hrv => "hrv",
            Metric::Rhr => "rhr",
            Metric::BodyFat => "body_fat_pct",
            Metric::Height => "height_inches",
            Metric::Weight => "weight_lbs",
            Metric::Vo2Max => "vo2_max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Hrv => "HRV",
            Metric::Rhr => "RHR",
            Metric::BodyFat => "Body Fat",
            Metric::Height => "Height",
            Metric::Weight => "Weight",
            Metric::Vo2Max => "VO2 Max",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Hrv => "ms",
            Metric::Rhr => "bpm",
            Metric::BodyFat => "%",
            Metric::Height => "in",
            Metric::Weight => "lbs",
            Metric::Vo2Max => "ml/kg/min",
        }
    }
}
