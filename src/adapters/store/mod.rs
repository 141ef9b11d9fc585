//! Dataset persistence
//!
//! Whole-collection load/save behind the [`PatientStore`] trait, so the record
//! service can run against a JSON file in production and memory in tests.

pub mod collection;
pub mod factory;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use collection::{PatientCollection, StoredRecord};
pub use factory::create_store;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::PatientStore;
