//! Server service
//!
//! Handles server creation, owner edits, and removal, keeping the icon and
//! banner files in step with each saved version.

use community_core::{DomainError, FileField, FileRef, RecordId, Server};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CreateServerRequest, ServerResponse, ServerView, UpdateServerRequest};
use crate::uploads::{validate_uploads, FileChange, UploadGuard};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Server service
pub struct ServerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ServerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_server(&self, server_id: RecordId) -> ServiceResult<ServerResponse> {
        let server = self.get_server_entity(server_id).await?;
        self.to_response(&server).await
    }

    #[instrument(skip(self))]
    pub async fn get_server_entity(&self, server_id: RecordId) -> ServiceResult<Server> {
        self.ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Server", server_id.to_string()))
    }

    /// Create a server owned by `owner_id`, who also becomes its first member
    #[instrument(skip(self, request, icon, banner))]
    pub async fn create_server(
        &self,
        owner_id: RecordId,
        request: CreateServerRequest,
        icon: FileChange,
        banner: FileChange,
    ) -> ServiceResult<ServerResponse> {
        request.validate()?;
        validate_uploads(&[
            (FileField::ServerIcon, &icon),
            (FileField::ServerBanner, &banner),
        ])?;

        let mut server = Server::new(
            self.ctx.generate_id(),
            request.name,
            owner_id,
            request.category_id,
        );
        server.description = request.description.filter(|d| !d.is_empty());

        let guard = self.ctx.upload_guard();
        let mut stored = Vec::new();
        let saved = match attach_files(&guard, &mut server, &icon, &banner, &mut stored).await {
            Ok(()) => self.ctx.server_repo().create(&server).await,
            Err(e) => Err(e),
        };
        if let Err(e) = saved {
            guard.discard(&stored).await;
            return Err(e.into());
        }

        info!(server_id = %server.id, owner_id = %owner_id, "Server created");
        self.to_response(&server).await
    }

    /// Apply an owner's edits; files the server no longer references are deleted
    #[instrument(skip(self, request, icon, banner))]
    pub async fn update_server(
        &self,
        server_id: RecordId,
        user_id: RecordId,
        request: UpdateServerRequest,
        icon: FileChange,
        banner: FileChange,
    ) -> ServiceResult<ServerResponse> {
        request.validate()?;
        validate_uploads(&[
            (FileField::ServerIcon, &icon),
            (FileField::ServerBanner, &banner),
        ])?;

        let previous = self.get_server_entity(server_id).await?;
        if !previous.is_owner(user_id) {
            return Err(DomainError::NotServerOwner.into());
        }

        let mut server = previous.clone();
        if let Some(name) = request.name {
            server.name = name;
        }
        if let Some(category_id) = request.category_id {
            server.category_id = category_id;
        }
        if let Some(description) = request.description {
            server.description = Some(description).filter(|d| !d.is_empty());
        }

        let guard = self.ctx.upload_guard();
        let mut stored = Vec::new();
        let saved = match attach_files(&guard, &mut server, &icon, &banner, &mut stored).await {
            Ok(()) => self.ctx.server_repo().update(&server).await,
            Err(e) => Err(e),
        };
        if let Err(e) = saved {
            guard.discard_new(&stored, &previous).await;
            return Err(e.into());
        }

        if let Err(e) = guard.cleanup_replaced(&previous, &server).await {
            warn!(server_id = %server_id, error = %e, "Stale server files left behind");
        }

        info!(server_id = %server_id, user_id = %user_id, "Server updated");
        self.to_response(&server).await
    }

    /// Delete a server (owner only), then its files
    #[instrument(skip(self))]
    pub async fn delete_server(&self, server_id: RecordId, user_id: RecordId) -> ServiceResult<()> {
        let server = self.get_server_entity(server_id).await?;
        if !server.is_owner(user_id) {
            return Err(DomainError::NotServerOwner.into());
        }

        self.ctx.server_repo().delete(server_id).await?;

        if let Err(e) = self.ctx.upload_guard().cleanup_on_delete(&server).await {
            warn!(server_id = %server_id, error = %e, "Server files left behind");
        }

        info!(server_id = %server_id, user_id = %user_id, "Server deleted");
        Ok(())
    }

    async fn to_response(&self, server: &Server) -> ServiceResult<ServerResponse> {
        let category = self
            .ctx
            .category_repo()
            .find_by_id(server.category_id)
            .await?
            .ok_or(DomainError::CategoryNotFound(server.category_id))?;
        let channels = self.ctx.channel_repo().find_by_server(server.id).await?;

        Ok(ServerResponse::from(ServerView {
            server,
            category_name: &category.name,
            channels: &channels,
            num_members: None,
        }))
    }
}

/// Store replacement icon/banner uploads and point the server at them
async fn attach_files(
    guard: &UploadGuard<'_>,
    server: &mut Server,
    icon: &FileChange,
    banner: &FileChange,
    stored: &mut Vec<FileRef>,
) -> Result<(), DomainError> {
    let id = server.id;
    let fields = [
        (FileField::ServerIcon, icon, &mut server.icon),
        (FileField::ServerBanner, banner, &mut server.banner),
    ];
    for (field, change, slot) in fields {
        if let Some(path) = guard.apply(field, id, change, slot).await? {
            stored.push(path);
        }
    }
    Ok(())
}
