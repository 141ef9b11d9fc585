//! In-memory store
//!
//! Used by tests and by `backend = "memory"` deployments. Each load returns a
//! fresh copy, so handlers see the same whole-collection semantics as with the
//! file store.

use super::collection::PatientCollection;
use super::traits::PatientStore;
use crate::domain::errors::CarebookError;
use crate::domain::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Memory-backed [`PatientStore`]
#[derive(Debug)]
pub struct InMemoryStore {
    /// `None` stands for a missing backing resource
    collection: RwLock<Option<PatientCollection>>,
    read_only: AtomicBool,
}

impl InMemoryStore {
    /// Create a store holding an empty collection
    pub fn new() -> Self {
        Self::with_collection(PatientCollection::new())
    }

    /// Create a store seeded with `collection`
    pub fn with_collection(collection: PatientCollection) -> Self {
        Self {
            collection: RwLock::new(Some(collection)),
            read_only: AtomicBool::new(false),
        }
    }

    /// Create a store whose backing resource does not exist
    pub fn unavailable() -> Self {
        Self {
            collection: RwLock::new(None),
            read_only: AtomicBool::new(false),
        }
    }

    /// Make subsequent saves fail with `StoreUnavailable`
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Copy of the current contents
    pub async fn snapshot(&self) -> Option<PatientCollection> {
        self.collection.read().await.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientStore for InMemoryStore {
    async fn load(&self) -> Result<PatientCollection> {
        self.collection
            .read()
            .await
            .clone()
            .ok_or_else(|| CarebookError::StoreUnavailable("In-memory dataset is absent".into()))
    }

    async fn save(&self, collection: &PatientCollection) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(CarebookError::StoreUnavailable(
                "In-memory dataset is read-only".into(),
            ));
        }
        *self.collection.write().await = Some(collection.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryStore::unavailable();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, CarebookError::StoreUnavailable(_)));
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_read_only_rejects_save_and_keeps_state() {
        let store = InMemoryStore::new();
        store.set_read_only(true);

        let replacement =
            PatientCollection::from_json(r#"{"P001": {"name": "x"}}"#).unwrap();
        let err = store.save(&replacement).await.unwrap_err();
        assert!(matches!(err, CarebookError::StoreUnavailable(_)));
        assert!(store.load().await.unwrap().is_empty());
    }
}
