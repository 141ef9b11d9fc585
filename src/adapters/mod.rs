//! External system integrations for Carebook.
//!
//! - [`store`] - Dataset persistence (trait-based)
//!
//! # Design Pattern
//!
//! Adapters isolate external resources behind traits so the record service can
//! be tested against in-memory implementations:
//!
//! ```rust,no_run
//! use carebook::adapters::store::{JsonFileStore, PatientStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("patient.json");
//! let collection = store.load().await?;
//! println!("{} patients", collection.len());
//! # Ok(())
//! # }
//! ```

pub mod store;
