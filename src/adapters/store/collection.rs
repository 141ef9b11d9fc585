//! In-memory form of the persisted dataset
//!
//! The on-disk shape is a single JSON object mapping identifier strings to
//! objects holding the stored fields. Records are kept as raw JSON objects so
//! that loading never silently drops or coerces anything; the schema is
//! applied by [`PatientCollection::decode`] when a handler needs it.

use crate::domain::errors::CarebookError;
use crate::domain::ids::PatientId;
use crate::domain::patient::{Patient, PatientDraft};
use crate::domain::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored fields of one record, exactly as persisted
pub type StoredRecord = Map<String, Value>;

/// Whole-collection snapshot, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientCollection(IndexMap<String, StoredRecord>);

impl PatientCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the persisted JSON text
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` if the text is not an object of objects.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            CarebookError::CorruptData(format!("Dataset is not an id-to-record mapping: {e}"))
        })
    }

    /// Serializes to the persisted JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &PatientId) -> bool {
        self.0.contains_key(id.as_str())
    }

    /// Raw stored fields for `id`
    pub fn get(&self, id: &PatientId) -> Option<&StoredRecord> {
        self.0.get(id.as_str())
    }

    /// Raw entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StoredRecord)> {
        self.0.iter()
    }

    /// Stores `patient` under `id`, keeping the position of an existing entry
    pub fn insert(&mut self, id: &PatientId, patient: &Patient) -> Result<()> {
        let record = match serde_json::to_value(patient)? {
            Value::Object(map) => map,
            other => {
                return Err(CarebookError::Serialization(format!(
                    "Patient serialized to a non-object value: {other}"
                )))
            }
        };
        self.0.insert(id.as_str().to_string(), record);
        Ok(())
    }

    /// Removes `id`, preserving the order of the remaining entries
    pub fn remove(&mut self, id: &PatientId) -> Option<StoredRecord> {
        self.0.shift_remove(id.as_str())
    }

    /// Reconstructs the record stored under `key` through the schema
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` if the stored fields do not form a valid record.
    pub fn decode(key: &str, record: &StoredRecord) -> Result<Patient> {
        let draft: PatientDraft = serde_json::from_value(Value::Object(record.clone()))
            .map_err(|e| {
                CarebookError::CorruptData(format!("Stored record '{key}' is malformed: {e}"))
            })?;
        draft.validate().map_err(|errors| {
            CarebookError::CorruptData(format!("Stored record '{key}' is invalid: {errors}"))
        })
    }

    /// Decodes the record for `id`, if present
    pub fn patient(&self, id: &PatientId) -> Result<Option<Patient>> {
        self.get(id)
            .map(|record| Self::decode(id.as_str(), record))
            .transpose()
    }
}
