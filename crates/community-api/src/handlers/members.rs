//! Membership handlers

use axum::extract::State;
use community_service::MemberService;

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Join a server
///
/// PUT /servers/{server_id}/members/@me
pub async fn join_server(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(server_id): IdPath,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.join_server(server_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Leave a server
///
/// DELETE /servers/{server_id}/members/@me
pub async fn leave_server(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(server_id): IdPath,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.leave_server(server_id, auth.user_id).await?;
    Ok(NoContent)
}
