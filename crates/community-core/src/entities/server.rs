//! Server entity - a community with an owner, members, and channels

use std::collections::BTreeSet;

use crate::traits::ManagedFiles;
use crate::value_objects::{FileField, FileRef, RecordId};

/// Maximum length of a server description
pub const SERVER_DESCRIPTION_MAX: usize = 250;

/// Server entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: RecordId,
    pub name: String,
    pub owner_id: RecordId,
    pub category_id: RecordId,
    pub description: Option<String>,
    pub member_ids: BTreeSet<RecordId>,
    pub banner: Option<FileRef>,
    pub icon: Option<FileRef>,
}

impl Server {
    /// Create a new server; the owner is its first member
    pub fn new(id: RecordId, name: String, owner_id: RecordId, category_id: RecordId) -> Self {
        Self {
            id,
            name,
            owner_id,
            category_id,
            description: None,
            member_ids: BTreeSet::from([owner_id]),
            banner: None,
            icon: None,
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: RecordId) -> bool {
        self.owner_id == user_id
    }

    #[inline]
    pub fn is_member(&self, user_id: RecordId) -> bool {
        self.member_ids.contains(&user_id)
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Returns false if the user was already a member
    pub fn add_member(&mut self, user_id: RecordId) -> bool {
        self.member_ids.insert(user_id)
    }

    /// Returns false if the user was not a member
    pub fn remove_member(&mut self, user_id: RecordId) -> bool {
        self.member_ids.remove(&user_id)
    }
}

impl ManagedFiles for Server {
    fn managed_files(&self) -> Vec<(FileField, Option<&FileRef>)> {
        vec![
            (FileField::ServerIcon, self.icon.as_ref()),
            (FileField::ServerBanner, self.banner.as_ref()),
        ]
    }
}
