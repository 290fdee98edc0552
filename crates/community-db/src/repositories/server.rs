//! PostgreSQL implementation of ServerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::{
    DomainError, FileRef, RecordId, RepoResult, Server, ServerRepository, ServerWithCategory,
};

use crate::mappers::{group_members, ServerParts};
use crate::models::{ServerListingModel, ServerMemberModel, ServerModel};

use super::error::{map_db_error, map_fk_violation, map_unique_violation};

/// PostgreSQL implementation of ServerRepository
#[derive(Clone)]
pub struct PgServerRepository {
    pool: PgPool,
}

impl PgServerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach member sets to server rows with one membership query
    async fn with_members(&self, models: Vec<ServerModel>) -> RepoResult<Vec<Server>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let rows = sqlx::query_as::<_, ServerMemberModel>(
            r"
            SELECT server_id, user_id
            FROM server_members
            WHERE server_id = ANY($1)
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut members = group_members(rows);
        Ok(models
            .into_iter()
            .map(|model| {
                let member_ids = members.remove(&model.id).unwrap_or_default();
                Server::from(ServerParts { model, member_ids })
            })
            .collect())
    }
}

#[async_trait]
impl ServerRepository for PgServerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Server>> {
        let model = sqlx::query_as::<_, ServerModel>(
            r"
            SELECT id, name, owner_id, category_id, description, banner, icon
            FROM servers
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => Ok(self.with_members(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_all_with_category(&self) -> RepoResult<Vec<ServerWithCategory>> {
        let rows = sqlx::query_as::<_, ServerListingModel>(
            r"
            SELECT s.id, s.name, s.owner_id, s.category_id, s.description, s.banner, s.icon,
                   c.name AS category_name
            FROM servers s
            JOIN categories c ON c.id = s.category_id
            ORDER BY s.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let (models, names): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .map(|row| (row.server, row.category_name))
            .unzip();

        let servers = self.with_members(models).await?;
        Ok(servers
            .into_iter()
            .zip(names)
            .map(|(server, category_name)| ServerWithCategory {
                server,
                category_name,
            })
            .collect())
    }

    #[instrument(skip(self, server), fields(server_id = %server.id))]
    async fn create(&self, server: &Server) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO servers (id, name, owner_id, category_id, description, banner, icon)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(server.id.into_inner())
        .bind(&server.name)
        .bind(server.owner_id.into_inner())
        .bind(server.category_id.into_inner())
        .bind(&server.description)
        .bind(server.banner.as_ref().map(FileRef::as_str))
        .bind(server.icon.as_ref().map(FileRef::as_str))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::CategoryNotFound(server.category_id)))?;

        let member_ids: Vec<i64> = server.member_ids.iter().map(|id| id.into_inner()).collect();
        sqlx::query(
            r"
            INSERT INTO server_members (server_id, user_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ",
        )
        .bind(server.id.into_inner())
        .bind(member_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, server), fields(server_id = %server.id))]
    async fn update(&self, server: &Server) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE servers
            SET name = $2, category_id = $3, description = $4, banner = $5, icon = $6
            WHERE id = $1
            ",
        )
        .bind(server.id.into_inner())
        .bind(&server.name)
        .bind(server.category_id.into_inner())
        .bind(&server.description)
        .bind(server.banner.as_ref().map(FileRef::as_str))
        .bind(server.icon.as_ref().map(FileRef::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::CategoryNotFound(server.category_id)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ServerNotFound(server.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM servers WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ServerNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_member(&self, server_id: RecordId, user_id: RecordId) -> RepoResult<()> {
        sqlx::query("INSERT INTO server_members (server_id, user_id) VALUES ($1, $2)")
            .bind(server_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .is_some_and(|db| db.is_foreign_key_violation())
                {
                    DomainError::ServerNotFound(server_id)
                } else {
                    map_unique_violation(e, || DomainError::AlreadyMember)
                }
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, server_id: RecordId, user_id: RecordId) -> RepoResult<()> {
        let result =
            sqlx::query("DELETE FROM server_members WHERE server_id = $1 AND user_id = $2")
                .bind(server_id.into_inner())
                .bind(user_id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }

        Ok(())
    }
}
