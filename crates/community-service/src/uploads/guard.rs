//! Upload lifecycle guard
//!
//! Keeps storage in step with the records that reference it:
//! - on save, any file the previous version referenced and the new version
//!   does not is deleted
//! - on delete, every file the record referenced is deleted
//! - a file stored for a save that then failed is discarded
//!
//! Deletion never writes the record again.

use community_core::{DomainError, FileField, FileRef, FileStorage, ManagedFiles, RecordId};
use tracing::{info, instrument, warn};

use super::{FileChange, Upload};

/// Applies file cleanup around record saves and deletes
pub struct UploadGuard<'a> {
    storage: &'a dyn FileStorage,
}

impl<'a> UploadGuard<'a> {
    pub fn new(storage: &'a dyn FileStorage) -> Self {
        Self { storage }
    }

    /// Store a validated upload at its place in the layout for record `id`
    #[instrument(skip(self, upload), fields(filename = %upload.filename))]
    pub async fn store(
        &self,
        field: FileField,
        id: RecordId,
        upload: &Upload,
    ) -> Result<FileRef, DomainError> {
        let path = field.upload_path(id, &upload.filename);
        self.storage.store(&path, &upload.bytes).await?;
        Ok(path)
    }

    /// Remove files stored for a save that did not go through
    pub async fn discard(&self, stored: &[FileRef]) {
        for file in stored {
            if let Err(e) = self.storage.delete(file).await {
                warn!(path = %file, error = %e, "Failed to discard orphaned upload");
            }
        }
    }

    /// Apply `change` to the record's `slot`, storing a replacement first
    ///
    /// Returns the reference written to storage, if any.
    pub async fn apply(
        &self,
        field: FileField,
        id: RecordId,
        change: &FileChange,
        slot: &mut Option<FileRef>,
    ) -> Result<Option<FileRef>, DomainError> {
        match change {
            FileChange::Keep => Ok(None),
            FileChange::Clear => {
                *slot = None;
                Ok(None)
            }
            FileChange::Replace(upload) => {
                let path = self.store(field, id, upload).await?;
                *slot = Some(path.clone());
                Ok(Some(path))
            }
        }
    }

    /// Like [`discard`](Self::discard), but keeps files `previous` still
    /// references (a same-named upload overwrote them in place)
    pub async fn discard_new<R>(&self, stored: &[FileRef], previous: &R)
    where
        R: ManagedFiles + Sync,
    {
        let kept: Vec<&FileRef> = previous
            .managed_files()
            .into_iter()
            .filter_map(|(_, file)| file)
            .collect();
        let orphans: Vec<FileRef> = stored
            .iter()
            .filter(|file| !kept.contains(file))
            .cloned()
            .collect();
        self.discard(&orphans).await;
    }

    /// Delete files `previous` referenced that `current` no longer does
    ///
    /// Both values must be versions of the same record. Returns the deleted
    /// references. Every field is attempted; the first failure is returned.
    pub async fn cleanup_replaced<R>(
        &self,
        previous: &R,
        current: &R,
    ) -> Result<Vec<FileRef>, DomainError>
    where
        R: ManagedFiles + Sync,
    {
        let stale: Vec<FileRef> = previous
            .managed_files()
            .into_iter()
            .zip(current.managed_files())
            .filter_map(|((field, old), (current_field, new))| {
                debug_assert_eq!(field, current_field);
                match old {
                    Some(old) if Some(old) != new => Some(old.clone()),
                    _ => None,
                }
            })
            .collect();

        self.delete_all(stale).await
    }

    /// Delete every file `record` references
    pub async fn cleanup_on_delete<R>(&self, record: &R) -> Result<Vec<FileRef>, DomainError>
    where
        R: ManagedFiles + Sync,
    {
        let attached: Vec<FileRef> = record
            .managed_files()
            .into_iter()
            .filter_map(|(_, file)| file.cloned())
            .collect();

        self.delete_all(attached).await
    }

    async fn delete_all(&self, files: Vec<FileRef>) -> Result<Vec<FileRef>, DomainError> {
        let mut first_error = None;
        let mut deleted = Vec::with_capacity(files.len());

        for file in files {
            match self.storage.delete(&file).await {
                Ok(()) => {
                    info!(path = %file, "Removed stale upload");
                    deleted.push(file);
                }
                Err(e) => {
                    warn!(path = %file, error = %e, "Failed to remove stale upload");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(deleted),
        }
    }
}
