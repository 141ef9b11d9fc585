//! Domain models and types for Carebook.
//!
//! This module contains the patient record schema, derived metrics, and the
//! error types shared by every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`])
//! - **Record schema** ([`Patient`], [`PatientDraft`], [`PatientPatch`], [`PatientView`])
//! - **Derived metrics** ([`metrics::bmi`], [`Verdict`])
//! - **Error types** ([`CarebookError`], [`ValidationErrors`])
//! - **Result type alias** ([`Result`])
//!
//! # Validation
//!
//! A [`Patient`] is only obtainable by validating a draft, and validation
//! reports every violated field at once:
//!
//! ```rust
//! use carebook::domain::PatientDraft;
//!
//! let draft = PatientDraft {
//!     name: Some("Ravi Mehta".to_string()),
//!     city: Some("Mumbai".to_string()),
//!     age: Some(35),
//!     gender: Some("Male".to_string()),
//!     height: Some(1.75),
//!     weight: Some(85.0),
//!     ..Default::default()
//! };
//!
//! let patient = draft.validate().unwrap();
//! assert_eq!(patient.bmi(), 27.76);
//! assert_eq!(patient.verdict().as_str(), "overweight");
//! ```

pub mod errors;
pub mod ids;
pub mod lenient;
pub mod metrics;
pub mod patch;
pub mod patient;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CarebookError, FieldError, ValidationErrors};
pub use ids::PatientId;
pub use metrics::{Metrics, Verdict};
pub use patch::PatientPatch;
pub use patient::{Gender, NewPatient, Patient, PatientDraft, PatientView};
pub use result::Result;
