use serde::{Deserialize, Serialize};

use crate::scoring::{BiometricInput, Sex};

/// Stored starting values for a person's biometrics.
///
/// Every field is optional; anything left out falls back to the input
/// domain default.
///
/// Example YAML:
/// ```yaml
/// sex: female
/// hrv: 64
/// rhr: 58
/// body_fat_pct: 21.5
/// height_inches: 65
/// weight_lbs: 138
/// vo2_max: 41.0
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_inches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vo2_max: Option<f64>,
}

impl Profile {
    /// A profile with every field filled in.
    pub fn from_input(input: &BiometricInput) -> Self {
        Self {
            sex: Some(input.sex),
            hrv: Some(input.hrv),
            rhr: Some(input.rhr),
            body_fat_pct: Some(input.body_fat_pct),
            height_inches: Some(input.height_inches),
            weight_lbs: Some(input.weight_lbs),
            vo2_max: Some(input.vo2_max),
        }
    }

    /// Layer `self` over `fallback`: fields set here win.
    pub fn or(self, fallback: Profile) -> Profile {
        Profile {
            sex: self.sex.or(fallback.sex),
            hrv: self.hrv.or(fallback.hrv),
            rhr: self.rhr.or(fallback.rhr),
            body_fat_pct: self.body_fat_pct.or(fallback.body_fat_pct),
            height_inches: self.height_inches.or(fallback.height_inches),
            weight_lbs: self.weight_lbs.or(fallback.weight_lbs),
            vo2_max: self.vo2_max.or(fallback.vo2_max),
        }
    }

    /// Fill any unset field from the input domain defaults.
    pub fn resolve(&self) -> BiometricInput {
        let defaults = BiometricInput::default();
        BiometricInput {
            sex: self.sex.unwrap_or(defaults.sex),
            hrv: self.hrv.unwrap_or(defaults.hrv),
            rhr: self.rhr.unwrap_or(defaults.rhr),
            body_fat_pct: self.body_fat_pct.unwrap_or(defaults.body_fat_pct),
            height_inches: self.height_inches.unwrap_or(defaults.height_inches),
            weight_lbs: self.weight_lbs.unwrap_or(defaults.weight_lbs),
            vo2_max: self.vo2_max.unwrap_or(defaults.vo2_max),
        }
    }
}
