//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::{Channel, ChannelRepository, DomainError, RecordId, RepoResult};

use crate::models::ChannelModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, name, owner_id, topic, server_id
            FROM channels
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_server(&self, server_id: RecordId) -> RepoResult<Vec<Channel>> {
        self.find_by_servers(&[server_id]).await
    }

    #[instrument(skip(self, server_ids), fields(count = server_ids.len()))]
    async fn find_by_servers(&self, server_ids: &[RecordId]) -> RepoResult<Vec<Channel>> {
        if server_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = server_ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, name, owner_id, topic, server_id
            FROM channels
            WHERE server_id = ANY($1)
            ORDER BY server_id, id
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channels (id, name, owner_id, topic, server_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(channel.owner_id.into_inner())
        .bind(&channel.topic)
        .bind(channel.server_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::ServerNotFound(channel.server_id)))?;

        Ok(())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channels
            SET name = $2, topic = $3
            WHERE id = $1
            ",
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(&channel.topic)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound(channel.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound(id));
        }

        Ok(())
    }
}
