//! Patient record service
//!
//! Each operation loads the whole collection from the store, applies the
//! schema, optionally mutates, and for writers saves the whole collection
//! back. Writers run under a process-wide lock so two requests in the same
//! process never interleave their load-mutate-save sequences. Nothing here
//! guards against other processes writing the same dataset.

use super::sort::{sort_views, SortKey, SortOrder};
use crate::adapters::store::{PatientCollection, PatientStore};
use crate::domain::errors::CarebookError;
use crate::domain::ids::PatientId;
use crate::domain::patch::PatientPatch;
use crate::domain::patient::{NewPatient, PatientView};
use crate::domain::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// CRUD operations over the patient dataset
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    write_lock: Mutex<()>,
}

impl PatientService {
    /// Create a service on top of `store`
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Backing store description, for logs
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Raw collection: identifier to stored fields, no derived values
    pub async fn list(&self) -> Result<PatientCollection> {
        let collection = self.store.load().await?;
        tracing::debug!(count = collection.len(), "Listed patients");
        Ok(collection)
    }

    /// Full record view for `id`
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `CorruptData` if the stored record is invalid.
    pub async fn get(&self, id: &PatientId) -> Result<PatientView> {
        let collection = self.store.load().await?;
        let patient = collection
            .patient(id)?
            .ok_or_else(|| CarebookError::NotFound(id.to_string()))?;
        Ok(PatientView::new(id.clone(), patient))
    }

    /// Every record view ordered by `sort_by`
    ///
    /// `sort_by` must be one of `weight`, `height`, `bmi`. `order` is
    /// descending only when it is exactly `desc`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an unknown `sort_by`, `CorruptData` if any stored
    /// record fails validation.
    pub async fn sort(&self, sort_by: &str, order: Option<&str>) -> Result<Vec<PatientView>> {
        let key: SortKey = sort_by.parse()?;
        let order = SortOrder::from_param(order);

        let collection = self.store.load().await?;
        let mut views = collection
            .iter()
            .map(|(raw_id, record)| {
                let patient = PatientCollection::decode(raw_id, record)?;
                let id = PatientId::new(raw_id.as_str()).map_err(|e| {
                    CarebookError::CorruptData(format!(
                        "Stored identifier '{raw_id}' is invalid: {e}"
                    ))
                })?;
                Ok(PatientView::new(id, patient))
            })
            .collect::<Result<Vec<_>>>()?;

        sort_views(&mut views, key, order);
        tracing::debug!(
            sort_by = %key,
            order = order.as_str(),
            count = views.len(),
            "Sorted patients"
        );
        Ok(views)
    }

    /// Validate and store a new record
    ///
    /// Heights above 3 are read as centimeters and stored in meters.
    ///
    /// # Errors
    ///
    /// `Validation` for bad fields, `Conflict` if the identifier exists.
    pub async fn create(&self, request: &NewPatient) -> Result<PatientId> {
        let (id, patient) = request.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load().await?;
        if collection.contains(&id) {
            return Err(CarebookError::Conflict(id.to_string()));
        }

        let patient = patient.with_normalized_height();
        collection.insert(&id, &patient)?;
        self.store.save(&collection).await?;

        tracing::info!(patient_id = %id, height = patient.height(), "Created patient");
        Ok(id)
    }

    /// Merge the supplied fields into an existing record
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Validation` if the merged record is invalid,
    /// `CorruptData` if the stored record was already invalid.
    pub async fn update(&self, id: &PatientId, patch: &PatientPatch) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load().await?;
        let current = collection
            .patient(id)?
            .ok_or_else(|| CarebookError::NotFound(id.to_string()))?;

        let updated = patch.apply(&current)?;
        collection.insert(id, &updated)?;
        self.store.save(&collection).await?;

        tracing::info!(
            patient_id = %id,
            fields = ?patch.supplied_fields(),
            "Updated patient"
        );
        Ok(())
    }

    /// Remove a record
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn delete(&self, id: &PatientId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load().await?;
        if collection.remove(id).is_none() {
            return Err(CarebookError::NotFound(id.to_string()));
        }
        self.store.save(&collection).await?;

        tracing::info!(patient_id = %id, "Deleted patient");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryStore;
    use crate::domain::patient::PatientDraft;

    fn request(id: &str, height: f64, weight: f64) -> NewPatient {
        NewPatient {
            id: Some(id.to_string()),
            fields: PatientDraft {
                name: Some("Priya Nair".to_string()),
                city: Some("Kochi".to_string()),
                age: Some(31),
                gender: Some("Female".to_string()),
                height: Some(height),
                weight: Some(weight),
                ..Default::default()
            },
        }
    }

    fn pid(s: &str) -> PatientId {
        PatientId::new(s).unwrap()
    }

    fn service() -> (PatientService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (PatientService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = service();
        service.create(&request("P001", 1.62, 58.0)).await.unwrap();

        let view = service.get(&pid("P001")).await.unwrap();
        assert_eq!(view.patient.height(), 1.62);
        assert_eq!(view.bmi, 22.1);
    }

    #[tokio::test]
    async fn test_validation_precedes_conflict() {
        let (service, _) = service();
        service.create(&request("P001", 1.62, 58.0)).await.unwrap();

        let err = service.create(&request("P001", 1.62, -1.0)).await.unwrap_err();
        assert!(matches!(err, CarebookError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_collection_unchanged() {
        let (service, store) = service();
        service.create(&request("P001", 1.62, 58.0)).await.unwrap();
        store.set_read_only(true);

        let err = service.delete(&pid("P001")).await.unwrap_err();
        assert!(matches!(err, CarebookError::StoreUnavailable(_)));
        assert!(service.get(&pid("P001")).await.is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_store_surfaces_on_every_operation() {
        let service = PatientService::new(Arc::new(InMemoryStore::unavailable()));
        let id = pid("P001");

        assert!(matches!(service.list().await, Err(CarebookError::StoreUnavailable(_))));
        assert!(matches!(service.get(&id).await, Err(CarebookError::StoreUnavailable(_))));
        assert!(matches!(
            service.sort("bmi", None).await,
            Err(CarebookError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.delete(&id).await,
            Err(CarebookError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_sort_key_checked_before_load() {
        let service = PatientService::new(Arc::new(InMemoryStore::unavailable()));
        let err = service.sort("blood_type", None).await.unwrap_err();
        assert!(matches!(err, CarebookError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_all_persisted() {
        let (service, store) = service();
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create(&request(&format!("P{i:03}"), 1.7, 65.0))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.snapshot().await.unwrap().len(), 20);
    }
}
