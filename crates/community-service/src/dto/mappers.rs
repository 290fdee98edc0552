//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use community_core::{Category, Channel, FileRef, Server};

use super::responses::{CategoryResponse, ChannelResponse, ServerResponse};

fn media_url(file: Option<&FileRef>) -> Option<String> {
    file.map(FileRef::url)
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            icon: media_url(category.icon.as_ref()),
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self::from(&category)
    }
}

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            name: channel.name.clone(),
            topic: channel.topic.clone(),
            owner: channel.owner_id.to_string(),
            server: channel.server_id.to_string(),
        }
    }
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self::from(&channel)
    }
}

// ============================================================================
// Server Mappers
// ============================================================================

/// Everything a serialized server is assembled from
pub struct ServerView<'a> {
    pub server: &'a Server,
    pub category_name: &'a str,
    pub channels: &'a [Channel],
    pub num_members: Option<usize>,
}

impl From<ServerView<'_>> for ServerResponse {
    fn from(view: ServerView<'_>) -> Self {
        let server = view.server;
        Self {
            id: server.id.to_string(),
            name: server.name.clone(),
            owner: server.owner_id.to_string(),
            category: view.category_name.to_string(),
            description: server.description.clone(),
            icon: media_url(server.icon.as_ref()),
            banner: media_url(server.banner.as_ref()),
            channel_server: view.channels.iter().map(ChannelResponse::from).collect(),
            num_members: view.num_members,
        }
    }
}
