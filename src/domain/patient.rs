//! Patient record schema
//!
//! A [`Patient`] can only be obtained by validating a [`PatientDraft`], so every
//! value of that type satisfies the field constraints. Drafts are the loose,
//! all-optional shape used both for client input and for decoding stored data.

use super::errors::ValidationErrors;
use super::ids::PatientId;
use super::lenient;
use super::metrics::{self, round_to, Verdict};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Heights above this value are taken to be centimeters on create
pub const CENTIMETER_THRESHOLD: f64 = 3.0;

/// Exclusive upper bound for `age`
pub const MAX_AGE: i64 = 120;

/// Patient gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Wire representation of the gender
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(format!("Invalid gender '{other}'. Must be one of: Male, Female")),
        }
    }
}

/// A validated patient record as it is persisted
///
/// Serializes to exactly the stored field set; the identifier is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    name: String,
    city: String,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
}

impl Patient {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Height in meters
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Weight in kilograms
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Body-mass index rounded to two decimals
    pub fn bmi(&self) -> f64 {
        metrics::bmi(self.height, self.weight)
    }

    /// Verdict bucket for the current BMI
    pub fn verdict(&self) -> Verdict {
        Verdict::from_bmi(self.bmi())
    }

    /// Applies the centimeter heuristic to the stored height
    ///
    /// A height above [`CENTIMETER_THRESHOLD`] is divided by 100 and rounded
    /// to three decimals. The result stays strictly positive.
    pub fn with_normalized_height(mut self) -> Self {
        self.height = normalize_height(self.height);
        self
    }
}

/// Converts a centimeter height to meters when it exceeds the threshold
pub fn normalize_height(height: f64) -> f64 {
    if height > CENTIMETER_THRESHOLD {
        round_to(height / 100.0, 3)
    } else {
        height
    }
}

/// Unvalidated record fields
///
/// Deserializes from any JSON object. A value of the wrong JSON type leaves
/// its field empty and is reported by [`PatientDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawDraft")]
pub struct PatientDraft {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,

    /// Type mismatches found while decoding
    pub rejected: ValidationErrors,
}

#[derive(Deserialize)]
struct RawDraft {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    city: Option<Value>,
    #[serde(default)]
    age: Option<Value>,
    #[serde(default)]
    gender: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    weight: Option<Value>,
}

impl From<RawDraft> for PatientDraft {
    fn from(raw: RawDraft) -> Self {
        let mut rejected = ValidationErrors::new();
        let name = raw.name.and_then(|v| lenient::text(&mut rejected, "name", v));
        let city = raw.city.and_then(|v| lenient::text(&mut rejected, "city", v));
        let age = raw.age.and_then(|v| lenient::integer(&mut rejected, "age", v));
        let gender = raw.gender.and_then(|v| lenient::text(&mut rejected, "gender", v));
        let height = raw.height.and_then(|v| lenient::number(&mut rejected, "height", v));
        let weight = raw.weight.and_then(|v| lenient::number(&mut rejected, "weight", v));
        Self {
            name,
            city,
            age,
            gender,
            height,
            weight,
            rejected,
        }
    }
}

impl PatientDraft {
    /// Validates every field and builds a [`Patient`]
    ///
    /// # Errors
    ///
    /// Returns all violated fields at once, in schema order.
    pub fn validate(&self) -> Result<Patient, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", self.name.as_deref(), self.absent("name"));
        let city = required_text(&mut errors, "city", self.city.as_deref(), self.absent("city"));

        let age = match self.age {
            None => {
                errors.push("age", self.absent("age"));
                None
            }
            Some(age) if age <= 0 || age >= MAX_AGE => {
                errors.push("age", "must be greater than 0 and less than 120");
                None
            }
            Some(age) => u32::try_from(age).ok(),
        };

        let gender = match self.gender.as_deref() {
            None => {
                errors.push("gender", self.absent("gender"));
                None
            }
            Some(raw) => match raw.parse::<Gender>() {
                Ok(gender) => Some(gender),
                Err(_) => {
                    errors.push("gender", "must be one of: Male, Female");
                    None
                }
            },
        };

        let height = positive(&mut errors, "height", self.height, self.absent("height"));
        let weight = positive(&mut errors, "weight", self.weight, self.absent("weight"));

        // weight / height² can overflow even when both are positive.
        if let (Some(height), Some(weight)) = (height, weight) {
            if !metrics::bmi(height, weight).is_finite() {
                errors.push("height", "is too small for the given weight");
            }
        }

        match (name, city, age, gender, height, weight) {
            (Some(name), Some(city), Some(age), Some(gender), Some(height), Some(weight))
                if errors.is_empty() =>
            {
                Ok(Patient {
                    name,
                    city,
                    age,
                    gender,
                    height,
                    weight,
                })
            }
            _ => Err(errors),
        }
    }

    /// Error message for an empty field: its type mismatch, if any
    fn absent(&self, field: &str) -> &str {
        self.rejected
            .errors()
            .iter()
            .find(|e| e.field == field)
            .map_or("field required", |e| e.message.as_str())
    }
}

impl From<&Patient> for PatientDraft {
    fn from(patient: &Patient) -> Self {
        Self {
            name: Some(patient.name.clone()),
            city: Some(patient.city.clone()),
            age: Some(i64::from(patient.age)),
            gender: Some(patient.gender.as_str().to_string()),
            height: Some(patient.height),
            weight: Some(patient.weight),
            rejected: ValidationErrors::new(),
        }
    }
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    absent: &str,
) -> Option<String> {
    match value {
        None => {
            errors.push(field, absent);
            None
        }
        Some(text) if text.trim().is_empty() => {
            errors.push(field, "must not be empty");
            None
        }
        Some(text) => Some(text.to_string()),
    }
}

fn positive(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<f64>,
    absent: &str,
) -> Option<f64> {
    match value {
        None => {
            errors.push(field, absent);
            None
        }
        Some(v) if v.is_finite() && v > 0.0 => Some(v),
        Some(_) => {
            errors.push(field, "must be greater than 0");
            None
        }
    }
}

/// Create request body: identifier plus a complete candidate record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawNewPatient")]
pub struct NewPatient {
    pub id: Option<String>,
    pub fields: PatientDraft,
}

#[derive(Deserialize)]
struct RawNewPatient {
    #[serde(default)]
    id: Option<Value>,

    #[serde(flatten)]
    fields: PatientDraft,
}

impl From<RawNewPatient> for NewPatient {
    fn from(raw: RawNewPatient) -> Self {
        let mut fields = raw.fields;
        let id = raw.id.and_then(|v| lenient::text(&mut fields.rejected, "id", v));
        Self { id, fields }
    }
}

impl NewPatient {
    /// Validates the identifier and every record field together
    ///
    /// The centimeter heuristic is not applied here.
    pub fn validate(&self) -> Result<(PatientId, Patient), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let id = match self.id.as_deref() {
            None => {
                errors.push("id", self.fields.absent("id"));
                None
            }
            Some(raw) => match PatientId::new(raw) {
                Ok(id) => Some(id),
                Err(message) => {
                    errors.push("id", message);
                    None
                }
            },
        };

        match (id, self.fields.validate()) {
            (Some(id), Ok(patient)) => Ok((id, patient)),
            (_, Ok(_)) => Err(errors),
            (_, Err(invalid)) => {
                errors.merge(invalid);
                Err(errors)
            }
        }
    }
}

/// Externally visible record: identifier, stored fields and derived metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientView {
    pub id: PatientId,

    #[serde(flatten)]
    pub patient: Patient,

    pub bmi: f64,

    pub verdict: Verdict,
}

impl PatientView {
    /// Builds the view, deriving BMI and verdict from the record
    pub fn new(id: PatientId, patient: Patient) -> Self {
        let derived = metrics::derive(&patient);
        Self {
            id,
            patient,
            bmi: derived.bmi,
            verdict: derived.verdict,
        }
    }
}
