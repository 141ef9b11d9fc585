//! Store factory
//!
//! This module creates the configured [`PatientStore`] implementation.

use super::json_file::JsonFileStore;
use super::memory::InMemoryStore;
use super::traits::PatientStore;
use crate::config::schema::{StoreBackend, StoreConfig};
use std::sync::Arc;

/// Create a store based on the configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements PatientStore
pub fn create_store(config: &StoreConfig) -> Arc<dyn PatientStore> {
    match config.backend {
        StoreBackend::Json => {
            tracing::info!(path = %config.path, "Creating JSON file store");
            Arc::new(JsonFileStore::new(&config.path))
        }
        StoreBackend::Memory => {
            tracing::warn!("Creating in-memory store; records are lost on exit");
            Arc::new(InMemoryStore::new())
        }
    }
}
