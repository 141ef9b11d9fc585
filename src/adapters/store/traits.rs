//! Store abstraction traits
//!
//! This module defines the trait that dataset backends must implement to be
//! used by the record service.

use super::collection::PatientCollection;
use crate::domain::Result;
use async_trait::async_trait;

/// Whole-collection persistence for patient records
///
/// Implementations hold no state across calls that would let a read observe
/// anything other than the last completed save.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Read the entire persisted collection
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the resource is missing or unreadable,
    /// `CorruptData` if it cannot be parsed into the expected mapping shape.
    async fn load(&self) -> Result<PatientCollection>;

    /// Overwrite the entire persisted collection
    ///
    /// Readers either see the previous collection or the new one, never a
    /// partial write.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the write fails.
    async fn save(&self, collection: &PatientCollection) -> Result<()>;

    /// Human-readable location of the backing resource, for logs
    fn describe(&self) -> String;
}
