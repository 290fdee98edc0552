//! Service context - dependency container for services
//!
//! Holds the repositories, file storage, and other dependencies needed by
//! services.

use std::sync::Arc;

use community_common::JwtService;
use community_core::{
    CategoryRepository, ChannelRepository, FileStorage, IdGenerator, RecordId, ServerRepository,
};

use super::error::{ServiceError, ServiceResult};
use crate::uploads::UploadGuard;

/// Service context containing all dependencies
///
/// Cloning is cheap; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    category_repo: Arc<dyn CategoryRepository>,
    server_repo: Arc<dyn ServerRepository>,
    channel_repo: Arc<dyn ChannelRepository>,

    // Uploaded files
    storage: Arc<dyn FileStorage>,

    jwt_service: Arc<JwtService>,
    id_generator: Arc<IdGenerator>,
}

impl ServiceContext {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        server_repo: Arc<dyn ServerRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        storage: Arc<dyn FileStorage>,
        jwt_service: Arc<JwtService>,
        id_generator: Arc<IdGenerator>,
    ) -> Self {
        Self {
            category_repo,
            server_repo,
            channel_repo,
            storage,
            jwt_service,
            id_generator,
        }
    }

    // === Repositories ===

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn server_repo(&self) -> &dyn ServerRepository {
        self.server_repo.as_ref()
    }

    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    // === Files ===

    pub fn storage(&self) -> &dyn FileStorage {
        self.storage.as_ref()
    }

    /// Upload lifecycle guard over the configured storage
    pub fn upload_guard(&self) -> UploadGuard<'_> {
        UploadGuard::new(self.storage())
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Allocate a new record id
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("storage", &"dyn FileStorage")
            .field("worker_id", &self.id_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    category_repo: Option<Arc<dyn CategoryRepository>>,
    server_repo: Option<Arc<dyn ServerRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    storage: Option<Arc<dyn FileStorage>>,
    jwt_service: Option<Arc<JwtService>>,
    id_generator: Option<Arc<IdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn server_repo(mut self, repo: Arc<dyn ServerRepository>) -> Self {
        self.server_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            required(self.category_repo, "category_repo")?,
            required(self.server_repo, "server_repo")?,
            required(self.channel_repo, "channel_repo")?,
            required(self.storage, "storage")?,
            required(self.jwt_service, "jwt_service")?,
            required(self.id_generator, "id_generator")?,
        ))
    }
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}
