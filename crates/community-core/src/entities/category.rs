//! Category entity - groups servers by topic

use crate::traits::ManagedFiles;
use crate::value_objects::{FileField, FileRef, RecordId};

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<FileRef>,
}

impl Category {
    pub fn new(id: RecordId, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            icon: None,
        }
    }

    pub fn icon_url(&self) -> Option<String> {
        self.icon.as_ref().map(FileRef::url)
    }
}

impl ManagedFiles for Category {
    fn managed_files(&self) -> Vec<(FileField, Option<&FileRef>)> {
        vec![(FileField::CategoryIcon, self.icon.as_ref())]
    }
}
