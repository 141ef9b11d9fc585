//! Domain identifier types with validation
//!
//! Patient identifiers are opaque strings chosen by the caller. They are the
//! collection key and never part of the stored record payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use carebook::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let id = PatientId::from_str("P001").unwrap();
/// assert_eq!(id.as_str(), "P001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or only whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PatientId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
