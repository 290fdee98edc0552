//! Channel service
//!
//! Channels live inside a server. Their names are stored lower-cased.

use community_core::{Channel, DomainError, RecordId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ChannelResponse, CreateChannelRequest, UpdateChannelRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_channels(&self, server_id: RecordId) -> ServiceResult<Vec<ChannelResponse>> {
        // 404 rather than an empty list for unknown servers
        self.ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Server", server_id.to_string()))?;

        let channels = self.ctx.channel_repo().find_by_server(server_id).await?;
        Ok(channels.iter().map(ChannelResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: RecordId) -> ServiceResult<ChannelResponse> {
        Ok(ChannelResponse::from(self.load(channel_id).await?))
    }

    /// Create a channel; only the server owner may
    #[instrument(skip(self, request))]
    pub async fn create_channel(
        &self,
        server_id: RecordId,
        user_id: RecordId,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request.validate()?;

        let server = self
            .ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Server", server_id.to_string()))?;
        if !server.is_owner(user_id) {
            return Err(DomainError::NotServerOwner.into());
        }

        let mut channel = Channel::new(self.ctx.generate_id(), &request.name, user_id, server_id);
        channel.topic = request.topic.unwrap_or_default();

        self.ctx.channel_repo().create(&channel).await?;

        info!(channel_id = %channel.id, server_id = %server_id, "Channel created");
        Ok(ChannelResponse::from(channel))
    }

    /// Update a channel; only its owner may
    #[instrument(skip(self, request))]
    pub async fn update_channel(
        &self,
        channel_id: RecordId,
        user_id: RecordId,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request.validate()?;

        let mut channel = self.load(channel_id).await?;
        if !channel.is_owner(user_id) {
            return Err(DomainError::NotChannelOwner.into());
        }

        if let Some(name) = request.name {
            channel.name = name;
        }
        if let Some(topic) = request.topic {
            channel.topic = topic;
        }
        channel.normalize();

        self.ctx.channel_repo().update(&channel).await?;

        info!(channel_id = %channel_id, "Channel updated");
        Ok(ChannelResponse::from(channel))
    }

    /// Delete a channel; only its owner may
    #[instrument(skip(self))]
    pub async fn delete_channel(&self, channel_id: RecordId, user_id: RecordId) -> ServiceResult<()> {
        let channel = self.load(channel_id).await?;
        if !channel.is_owner(user_id) {
            return Err(DomainError::NotChannelOwner.into());
        }

        self.ctx.channel_repo().delete(channel_id).await?;

        info!(channel_id = %channel_id, server_id = %channel.server_id, "Channel deleted");
        Ok(())
    }

    async fn load(&self, channel_id: RecordId) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", channel_id.to_string()))
    }
}
