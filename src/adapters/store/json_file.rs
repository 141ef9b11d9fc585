//! JSON file store
//!
//! Persists the collection as one JSON document. Saves write a sibling
//! temporary file, flush it to disk, then rename it over the target so a
//! concurrent reader sees either the old or the new document.

use super::collection::PatientCollection;
use super::traits::PatientStore;
use crate::domain::errors::CarebookError;
use crate::domain::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// File-backed [`PatientStore`]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the dataset at `path`
    ///
    /// The file is not touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty dataset if the file does not exist yet
    ///
    /// Returns `true` when a new file was written.
    pub async fn initialize(&self) -> Result<bool> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CarebookError::StoreUnavailable(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        self.save(&PatientCollection::new()).await?;
        tracing::info!(path = %self.path.display(), "Created empty dataset");
        Ok(true)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            CarebookError::StoreUnavailable(format!(
                "Dataset path has no file name: {}",
                self.path.display()
            ))
        })?;
        let mut temp_name = OsString::from(".");
        temp_name.push(file_name);
        temp_name.push(".tmp");
        Ok(self.path.with_file_name(temp_name))
    }

    async fn write_temp(&self, temp: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl PatientStore for JsonFileStore {
    async fn load(&self) -> Result<PatientCollection> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CarebookError::StoreUnavailable(format!(
                "Failed to read dataset {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let collection = PatientCollection::from_json(&text)?;
        tracing::debug!(
            path = %self.path.display(),
            count = collection.len(),
            "Loaded dataset"
        );
        Ok(collection)
    }

    async fn save(&self, collection: &PatientCollection) -> Result<()> {
        let contents = collection.to_json()?;
        let temp = self.temp_path()?;

        if let Err(e) = self.write_temp(&temp, contents.as_bytes()).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(CarebookError::StoreUnavailable(format!(
                "Failed to write dataset {}: {}",
                temp.display(),
                e
            )));
        }

        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            CarebookError::StoreUnavailable(format!(
                "Failed to replace dataset {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            count = collection.len(),
            "Saved dataset"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
