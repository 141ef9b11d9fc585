//! Core business logic for Carebook.
//!
//! # Modules
//!
//! - [`records`] - The record service and its sort parameters
//!
//! # Request Workflow
//!
//! Every operation follows the same shape:
//!
//! 1. **Load**: Read the whole collection from the store
//! 2. **Validate**: Reconstruct records through the schema
//! 3. **Mutate** (writers only): Insert, merge, or remove one entry
//! 4. **Save** (writers only): Persist the whole collection
//!
//! # Example
//!
//! ```rust,no_run
//! use carebook::adapters::store::JsonFileStore;
//! use carebook::core::records::PatientService;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = PatientService::new(Arc::new(JsonFileStore::new("patient.json")));
//!
//! for view in service.sort("bmi", Some("desc")).await? {
//!     println!("{} {} {}", view.id, view.bmi, view.verdict);
//! }
//! # Ok(())
//! # }
//! ```

pub mod records;
