//! Derived health metrics
//!
//! Body-mass index and the verdict bucket are pure functions of height and
//! weight. They are computed on every read and never persisted.

use super::patient::Patient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper (exclusive) BMI bound of the "under weight" bucket
pub const UNDERWEIGHT_LIMIT: f64 = 18.5;

/// Upper (exclusive) BMI bound of the "normal" bucket
pub const NORMAL_LIMIT: f64 = 25.0;

/// Upper (exclusive) BMI bound of the "overweight" bucket
pub const OVERWEIGHT_LIMIT: f64 = 30.0;

/// Categorical health verdict derived from BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "under weight")]
    UnderWeight,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "overweight")]
    Overweight,
    #[serde(rename = "obese")]
    Obese,
}

impl Verdict {
    /// Buckets a BMI value
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_LIMIT {
            Verdict::UnderWeight
        } else if bmi < NORMAL_LIMIT {
            Verdict::Normal
        } else if bmi < OVERWEIGHT_LIMIT {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    /// Wire representation of the verdict
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::UnderWeight => "under weight",
            Verdict::Normal => "normal",
            Verdict::Overweight => "overweight",
            Verdict::Obese => "obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived values for one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub bmi: f64,
    pub verdict: Verdict,
}

/// Rounds `value` to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `weight / height²` rounded to two decimals
pub fn bmi(height: f64, weight: f64) -> f64 {
    round_to(weight / (height * height), 2)
}

/// Computes BMI and verdict for a validated record
pub fn derive(patient: &Patient) -> Metrics {
    let bmi = bmi(patient.height(), patient.weight());
    Metrics {
        bmi,
        verdict: Verdict::from_bmi(bmi),
    }
}
