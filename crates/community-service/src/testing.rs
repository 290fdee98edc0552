//! In-memory fakes of the repository and storage ports for service tests

use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use community_common::JwtService;
use community_core::{
    Category, CategoryRepository, Channel, ChannelRepository, DomainError, FileRef, FileStorage,
    IdGenerator, RecordId, RepoResult, Server, ServerRepository, ServerWithCategory,
};
use image::{ImageFormat, RgbImage};

use crate::services::{ServiceContext, ServiceContextBuilder};

/// Encode a blank PNG of the given size
pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

// ============================================================================
// Storage
// ============================================================================

/// File storage that keeps bytes in a map and records every deletion
#[derive(Default)]
pub(crate) struct MemoryStorage {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
    failing: Mutex<BTreeSet<String>>,
}

impl MemoryStorage {
    /// Paths passed to successful `delete` calls, in call order
    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub(crate) fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    /// Make every later delete of `path` fail
    pub(crate) fn fail_deletes_of(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn store(&self, path: &FileRef, bytes: &[u8]) -> Result<(), DomainError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), bytes.to_vec());
        Ok(())
    }

    async fn delete(&self, path: &FileRef) -> Result<(), DomainError> {
        if self.failing.lock().unwrap().contains(path.as_str()) {
            return Err(DomainError::StorageError(format!("cannot delete {path}")));
        }
        self.files.lock().unwrap().remove(path.as_str());
        self.deleted.lock().unwrap().push(path.as_str().to_string());
        Ok(())
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
struct Tables {
    categories: BTreeMap<RecordId, Category>,
    servers: BTreeMap<RecordId, Server>,
    channels: BTreeMap<RecordId, Channel>,
}

impl Tables {
    fn drop_server(&mut self, id: RecordId) {
        self.servers.remove(&id);
        self.channels.retain(|_, c| c.server_id != id);
    }
}

/// One in-memory record store implementing every repository port, with the
/// same cascade rules as the database schema
#[derive(Default)]
pub(crate) struct MemoryRepos {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryRepos {
    /// Make every create and update fail until switched back
    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn server(&self, id: RecordId) -> Option<Server> {
        self.tables.lock().unwrap().servers.get(&id).cloned()
    }

    pub(crate) fn category(&self, id: RecordId) -> Option<Category> {
        self.tables.lock().unwrap().categories.get(&id).cloned()
    }

    pub(crate) fn channel(&self, id: RecordId) -> Option<Channel> {
        self.tables.lock().unwrap().channels.get(&id).cloned()
    }

    fn check_write(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryRepos {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Category>> {
        Ok(self.category(id))
    }

    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        Ok(self.tables.lock().unwrap().categories.values().cloned().collect())
    }

    async fn create(&self, category: &Category) -> RepoResult<()> {
        self.check_write()?;
        self.tables
            .lock()
            .unwrap()
            .categories
            .insert(category.id, category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> RepoResult<()> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        match tables.categories.get_mut(&category.id) {
            Some(row) => {
                *row = category.clone();
                Ok(())
            }
            None => Err(DomainError::CategoryNotFound(category.id)),
        }
    }

    async fn delete(&self, id: RecordId) -> RepoResult<Vec<Server>> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .categories
            .remove(&id)
            .ok_or(DomainError::CategoryNotFound(id))?;
        let removed: Vec<Server> = tables
            .servers
            .values()
            .filter(|s| s.category_id == id)
            .map(|s| Server {
                member_ids: BTreeSet::new(),
                ..s.clone()
            })
            .collect();
        for server in &removed {
            tables.drop_server(server.id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ServerRepository for MemoryRepos {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Server>> {
        Ok(self.server(id))
    }

    async fn find_all_with_category(&self) -> RepoResult<Vec<ServerWithCategory>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .servers
            .values()
            .filter_map(|server| {
                tables
                    .categories
                    .get(&server.category_id)
                    .map(|category| ServerWithCategory {
                        server: server.clone(),
                        category_name: category.name.clone(),
                    })
            })
            .collect())
    }

    async fn create(&self, server: &Server) -> RepoResult<()> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.categories.contains_key(&server.category_id) {
            return Err(DomainError::CategoryNotFound(server.category_id));
        }
        tables.servers.insert(server.id, server.clone());
        Ok(())
    }

    async fn update(&self, server: &Server) -> RepoResult<()> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.categories.contains_key(&server.category_id) {
            return Err(DomainError::CategoryNotFound(server.category_id));
        }
        let row = tables
            .servers
            .get_mut(&server.id)
            .ok_or(DomainError::ServerNotFound(server.id))?;
        // membership is owned by add_member/remove_member
        let members = std::mem::take(&mut row.member_ids);
        *row = server.clone();
        row.member_ids = members;
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.servers.contains_key(&id) {
            return Err(DomainError::ServerNotFound(id));
        }
        tables.drop_server(id);
        Ok(())
    }

    async fn add_member(&self, server_id: RecordId, user_id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let server = tables
            .servers
            .get_mut(&server_id)
            .ok_or(DomainError::ServerNotFound(server_id))?;
        if server.add_member(user_id) {
            Ok(())
        } else {
            Err(DomainError::AlreadyMember)
        }
    }

    async fn remove_member(&self, server_id: RecordId, user_id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let removed = tables
            .servers
            .get_mut(&server_id)
            .is_some_and(|server| server.remove_member(user_id));
        if removed {
            Ok(())
        } else {
            Err(DomainError::MemberNotFound)
        }
    }
}

#[async_trait]
impl ChannelRepository for MemoryRepos {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Channel>> {
        Ok(self.channel(id))
    }

    async fn find_by_server(&self, server_id: RecordId) -> RepoResult<Vec<Channel>> {
        self.find_by_servers(&[server_id]).await
    }

    async fn find_by_servers(&self, server_ids: &[RecordId]) -> RepoResult<Vec<Channel>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .channels
            .values()
            .filter(|c| server_ids.contains(&c.server_id))
            .cloned()
            .collect())
    }

    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.servers.contains_key(&channel.server_id) {
            return Err(DomainError::ServerNotFound(channel.server_id));
        }
        tables.channels.insert(channel.id, channel.clone());
        Ok(())
    }

    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .channels
            .get_mut(&channel.id)
            .ok_or(DomainError::ChannelNotFound(channel.id))?;
        *row = channel.clone();
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.tables
            .lock()
            .unwrap()
            .channels
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::ChannelNotFound(id))
    }
}

// ============================================================================
// Context
// ============================================================================

/// A service context wired to in-memory fakes, with handles on the fakes
pub(crate) struct Harness {
    pub ctx: ServiceContext,
    pub repos: Arc<MemoryRepos>,
    pub storage: Arc<MemoryStorage>,
}

pub(crate) fn harness() -> Harness {
    let repos = Arc::new(MemoryRepos::default());
    let storage = Arc::new(MemoryStorage::default());

    let ctx = ServiceContextBuilder::new()
        .category_repo(repos.clone())
        .server_repo(repos.clone())
        .channel_repo(repos.clone())
        .storage(storage.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
        .id_generator(Arc::new(IdGenerator::new(1)))
        .build()
        .unwrap();

    Harness {
        ctx,
        repos,
        storage,
    }
}
