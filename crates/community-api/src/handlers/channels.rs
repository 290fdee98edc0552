//! Channel handlers
//!
//! Endpoints for channel management.

use axum::{extract::State, Json};
use community_service::dto::{ChannelResponse, CreateChannelRequest, UpdateChannelRequest};
use community_service::ChannelService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Get a server's channels
///
/// GET /servers/{server_id}/channels
pub async fn get_server_channels(
    State(state): State<AppState>,
    IdPath(server_id): IdPath,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    Ok(Json(service.list_channels(server_id).await?))
}

/// Create a channel in a server (server owner only)
///
/// POST /servers/{server_id}/channels
pub async fn create_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(server_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service
        .create_channel(server_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    IdPath(channel_id): IdPath,
) -> ApiResult<Json<ChannelResponse>> {
    let service = ChannelService::new(state.service_context());
    Ok(Json(service.get_channel(channel_id).await?))
}

/// Update a channel (channel owner only)
///
/// PATCH /channels/{channel_id}
pub async fn update_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(channel_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service
        .update_channel(channel_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a channel (channel owner only)
///
/// DELETE /channels/{channel_id}
pub async fn delete_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(channel_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ChannelService::new(state.service_context());
    service.delete_channel(channel_id, auth.user_id).await?;
    Ok(NoContent)
}
