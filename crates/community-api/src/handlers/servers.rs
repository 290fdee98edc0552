//! Server handlers
//!
//! Server CRUD plus the filtered listing at `/server/select`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use community_service::dto::{
    CreateServerRequest, ServerListParams, ServerResponse, UpdateServerRequest,
};
use community_service::{ServerListingService, ServerService};

use crate::extractors::{AuthUser, IdPath, MultipartForm, OptionalAuthUser};
use crate::response::{ApiError, ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// Tag for grouping server endpoints in OpenAPI documentation
pub static SERVER_TAG: &str = "server";

/// List servers, optionally filtered
///
/// Filters apply in a fixed order: category, caller membership, limit,
/// single server id. Member counts are attached last.
///
/// # Access Control
/// - Public, except `by_user=true` which needs a bearer token
///
/// # Arguments
/// - `category` - Category name to match exactly
/// - `qty` - Keep at most this many servers
/// - `by_user` - `true` to keep servers the caller belongs to
/// - `by_serverid` - Keep only the server with this id
/// - `with_num_members` - `true` to include `num_members`
///
/// # Returns
/// - `200 OK` - Matching servers with their channels
/// - `400 Bad Request` - Malformed `qty` or unknown `by_serverid`
/// - `401 Unauthorized` - `by_user=true` without a valid token
#[utoipa::path(
    get,
    path = "/api/v1/server/select",
    tag = SERVER_TAG,
    params(ServerListParams),
    responses(
        (status = 200, description = "Matching servers", body = [ServerResponse]),
        (status = 400, description = "Invalid query parameter", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody)
    ),
)]
pub async fn list_servers(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    params: Result<Query<ServerListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ServerResponse>>> {
    let Query(params) = params.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = ServerListingService::new(state.service_context());
    let servers = service.list_servers(&params, auth.user_id()).await?;
    Ok(Json(servers))
}

/// Create a server owned by the caller
///
/// POST /servers (multipart: `name`, `category_id`, `description`, `icon`,
/// `banner`)
#[utoipa::path(
    post,
    path = "/api/v1/servers",
    tag = SERVER_TAG,
    responses(
        (status = 201, description = "Server created", body = ServerResponse),
        (status = 400, description = "Invalid fields or files", body = ErrorBody),
        (status = 401, description = "No valid token", body = ErrorBody)
    ),
)]
pub async fn create_server(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> ApiResult<Created<Json<ServerResponse>>> {
    let category_id = form
        .take_id("category_id")?
        .ok_or_else(|| ApiError::invalid_body("Missing form field: category_id"))?;

    let request = CreateServerRequest {
        name: form.require_text("name")?,
        category_id,
        description: form.take_text("description"),
    };
    let icon = form.file_change("icon", "clear_icon");
    let banner = form.file_change("banner", "clear_banner");

    let service = ServerService::new(state.service_context());
    let response = service
        .create_server(auth.user_id, request, icon, banner)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /servers/{server_id}
pub async fn get_server(
    State(state): State<AppState>,
    IdPath(server_id): IdPath,
) -> ApiResult<Json<ServerResponse>> {
    let service = ServerService::new(state.service_context());
    Ok(Json(service.get_server(server_id).await?))
}

/// Update a server (owner only)
///
/// PATCH /servers/{server_id} (multipart; `clear_icon=true` and
/// `clear_banner=true` remove the files)
pub async fn update_server(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(server_id): IdPath,
    mut form: MultipartForm,
) -> ApiResult<Json<ServerResponse>> {
    let request = UpdateServerRequest {
        name: form.take_text("name"),
        category_id: form.take_id("category_id")?,
        description: form.take_text("description"),
    };
    let icon = form.file_change("icon", "clear_icon");
    let banner = form.file_change("banner", "clear_banner");

    let service = ServerService::new(state.service_context());
    let response = service
        .update_server(server_id, auth.user_id, request, icon, banner)
        .await?;
    Ok(Json(response))
}

/// Delete a server (owner only)
///
/// DELETE /servers/{server_id}
pub async fn delete_server(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(server_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ServerService::new(state.service_context());
    service.delete_server(server_id, auth.user_id).await?;
    Ok(NoContent)
}
