//! Merge-patch input for partial updates
//!
//! Each field distinguishes "not supplied" (`None`) from "supplied as null"
//! (`Some(None)`) from "supplied with a value" (`Some(Some(v))`). Only
//! supplied fields overwrite the stored record.

use super::errors::ValidationErrors;
use super::lenient;
use super::patient::{Patient, PatientDraft};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Partial update body
///
/// A supplied value of the wrong JSON type is left unsupplied and reported by
/// [`PatientPatch::apply`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawPatch")]
pub struct PatientPatch {
    pub name: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub age: Option<Option<i64>>,
    pub gender: Option<Option<String>>,
    pub height: Option<Option<f64>>,
    pub weight: Option<Option<f64>>,

    /// Type mismatches found while decoding
    pub rejected: ValidationErrors,
}

#[derive(Deserialize)]
struct RawPatch {
    #[serde(default, deserialize_with = "supplied")]
    name: Option<Option<Value>>,
    #[serde(default, deserialize_with = "supplied")]
    city: Option<Option<Value>>,
    #[serde(default, deserialize_with = "supplied")]
    age: Option<Option<Value>>,
    #[serde(default, deserialize_with = "supplied")]
    gender: Option<Option<Value>>,
    #[serde(default, deserialize_with = "supplied")]
    height: Option<Option<Value>>,
    #[serde(default, deserialize_with = "supplied")]
    weight: Option<Option<Value>>,
}

/// Marks a present key as supplied, even when its value is `null`
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<RawPatch> for PatientPatch {
    fn from(raw: RawPatch) -> Self {
        let mut rejected = ValidationErrors::new();
        let name = typed(&mut rejected, "name", raw.name, lenient::text);
        let city = typed(&mut rejected, "city", raw.city, lenient::text);
        let age = typed(&mut rejected, "age", raw.age, lenient::integer);
        let gender = typed(&mut rejected, "gender", raw.gender, lenient::text);
        let height = typed(&mut rejected, "height", raw.height, lenient::number);
        let weight = typed(&mut rejected, "weight", raw.weight, lenient::number);
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

fn typed<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Option<Value>>,
    check: fn(&mut ValidationErrors, &str, Value) -> Option<T>,
) -> Option<Option<T>> {
    match value? {
        None => Some(None),
        Some(value) => check(errors, field, value).map(Some),
    }
}

impl PatientPatch {
    /// Names of the fields present in the patch
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.city.is_some() {
            fields.push("city");
        }
        if self.age.is_some() {
            fields.push("age");
        }
        if self.gender.is_some() {
            fields.push("gender");
        }
        if self.height.is_some() {
            fields.push("height");
        }
        if self.weight.is_some() {
            fields.push("weight");
        }
        fields
    }

    /// Merges the supplied fields over `current` and re-validates the result
    ///
    /// # Errors
    ///
    /// Returns every violated field, including fields explicitly set to null.
    pub fn apply(&self, current: &Patient) -> Result<Patient, ValidationErrors> {
        let mut errors = self.rejected.clone();
        let mut draft = PatientDraft::from(current);

        merge(&mut errors, "name", &mut draft.name, &self.name);
        merge(&mut errors, "city", &mut draft.city, &self.city);
        merge(&mut errors, "age", &mut draft.age, &self.age);
        merge(&mut errors, "gender", &mut draft.gender, &self.gender);
        merge(&mut errors, "height", &mut draft.height, &self.height);
        merge(&mut errors, "weight", &mut draft.weight, &self.weight);

        match draft.validate() {
            Ok(patient) if errors.is_empty() => Ok(patient),
            Ok(_) => Err(errors),
            Err(invalid) => {
                errors.merge(invalid);
                Err(errors)
            }
        }
    }
}

fn merge<T: Clone>(
    errors: &mut ValidationErrors,
    field: &str,
    target: &mut Option<T>,
    patch: &Option<Option<T>>,
) {
    match patch {
        None => {}
        Some(None) => errors.push(field, "must not be null"),
        Some(Some(value)) => *target = Some(value.clone()),
    }
}
