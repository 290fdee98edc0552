//! Member service
//!
//! Joining and leaving servers. Only the membership association changes;
//! neither the user nor the server is touched otherwise.

use community_core::{DomainError, RecordId};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn join_server(&self, server_id: RecordId, user_id: RecordId) -> ServiceResult<()> {
        let server = self
            .ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Server", server_id.to_string()))?;
        if server.is_member(user_id) {
            return Err(DomainError::AlreadyMember.into());
        }

        self.ctx.server_repo().add_member(server_id, user_id).await?;

        info!(server_id = %server_id, user_id = %user_id, "Member joined server");
        Ok(())
    }

    /// Leave a server; its owner cannot
    #[instrument(skip(self))]
    pub async fn leave_server(&self, server_id: RecordId, user_id: RecordId) -> ServiceResult<()> {
        let server = self
            .ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Server", server_id.to_string()))?;
        if server.is_owner(user_id) {
            return Err(DomainError::CannotLeaveOwnedServer.into());
        }

        self.ctx.server_repo().remove_member(server_id, user_id).await?;

        info!(server_id = %server_id, user_id = %user_id, "Member left server");
        Ok(())
    }
}
