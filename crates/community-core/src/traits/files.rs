//! File storage port and the file fields records carry

use async_trait::async_trait;

use crate::error::DomainError;
use crate::value_objects::{FileField, FileRef};

/// Blob storage for uploaded files
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `bytes` at `path`, replacing anything already there
    async fn store(&self, path: &FileRef, bytes: &[u8]) -> Result<(), DomainError>;

    /// Remove the file at `path`. A missing file is not an error.
    async fn delete(&self, path: &FileRef) -> Result<(), DomainError>;
}

/// Records that own uploaded files
pub trait ManagedFiles {
    /// Every file field with its current value
    fn managed_files(&self) -> Vec<(FileField, Option<&FileRef>)>;
}
