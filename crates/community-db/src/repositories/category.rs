//! PostgreSQL implementation of CategoryRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::{
    Category, CategoryRepository, DomainError, FileRef, RecordId, RepoResult, Server,
};

use crate::mappers::ServerParts;
use crate::models::{CategoryModel, ServerModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, description, icon
            FROM categories
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let results = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, description, icon
            FROM categories
            ORDER BY name, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn create(&self, category: &Category) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO categories (id, name, description, icon)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.icon.as_ref().map(FileRef::as_str))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn update(&self, category: &Category) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE categories
            SET name = $2, description = $3, icon = $4
            WHERE id = $1
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.icon.as_ref().map(FileRef::as_str))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(category.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<Vec<Server>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query_as::<_, ServerModel>(
            r"
            DELETE FROM servers
            WHERE category_id = $1
            RETURNING id, name, owner_id, category_id, description, banner, icon
            ",
        )
        .bind(id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Dropping the transaction rolls the server delete back
        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(removed
            .into_iter()
            .map(|model| {
                Server::from(ServerParts {
                    model,
                    member_ids: BTreeSet::new(),
                })
            })
            .collect())
    }
}
