//! Local-disk implementation of FileStorage
//!
//! Files live at `{root}/{file_ref}`; the root is what `/media` serves.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use community_core::{DomainError, FileRef, FileStorage};

/// Stores uploads under a root directory
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create the storage, making the root directory if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", root.display())))?;
        info!(root = %root.display(), "Upload storage directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a stored file
    ///
    /// Only plain relative components are accepted, so a reference can never
    /// point outside the root.
    pub fn resolve(&self, file: &FileRef) -> Result<PathBuf, DomainError> {
        let relative = Path::new(file.as_str());
        let is_plain = relative.components().next().is_some()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !is_plain {
            return Err(DomainError::StorageError(format!(
                "invalid storage path: {file}"
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    #[instrument(skip(self, bytes), fields(path = %path, size = bytes.len()))]
    async fn store(&self, path: &FileRef, bytes: &[u8]) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
        }

        fs::write(&target, bytes)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        debug!("Stored upload");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn delete(&self, path: &FileRef) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!("Deleted upload");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Upload already missing, nothing to delete");
                Ok(())
            }
            Err(e) => Err(DomainError::StorageError(e.to_string())),
        }
    }
}
