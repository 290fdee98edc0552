//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Category, Channel, Server};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Category>>;

    /// List all categories ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Category>>;

    /// Create a new category
    async fn create(&self, category: &Category) -> RepoResult<()>;

    /// Update an existing category
    async fn update(&self, category: &Category) -> RepoResult<()>;

    /// Delete a category and its servers atomically, returning the removed
    /// servers (without members)
    async fn delete(&self, id: RecordId) -> RepoResult<Vec<Server>>;
}

// ============================================================================
// Server Repository
// ============================================================================

/// A server joined with the name of its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerWithCategory {
    pub server: Server,
    pub category_name: String,
}

#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Find server by ID, members included
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Server>>;

    /// Every server with its category name, ordered by id ascending
    async fn find_all_with_category(&self) -> RepoResult<Vec<ServerWithCategory>>;

    /// Create a new server and its membership rows
    async fn create(&self, server: &Server) -> RepoResult<()>;

    /// Update server fields (membership is managed separately)
    async fn update(&self, server: &Server) -> RepoResult<()>;

    /// Delete a server; channels and membership rows go with it
    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    /// Add a membership row
    async fn add_member(&self, server_id: RecordId, user_id: RecordId) -> RepoResult<()>;

    /// Remove a membership row
    async fn remove_member(&self, server_id: RecordId, user_id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Channel>>;

    /// List all channels in a server
    async fn find_by_server(&self, server_id: RecordId) -> RepoResult<Vec<Channel>>;

    /// List the channels of several servers at once
    async fn find_by_servers(&self, server_ids: &[RecordId]) -> RepoResult<Vec<Channel>>;

    /// Create a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    /// Update an existing channel
    async fn update(&self, channel: &Channel) -> RepoResult<()>;

    /// Delete a channel
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}
