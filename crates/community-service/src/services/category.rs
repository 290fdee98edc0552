//! Category service
//!
//! Handles category creation, edits, and removal together with the icon
//! files categories and their servers reference.

use community_core::{Category, FileField, RecordId};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::uploads::{validate_uploads, FileChange};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every category
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().find_all().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, category_id: RecordId) -> ServiceResult<CategoryResponse> {
        Ok(CategoryResponse::from(self.load(category_id).await?))
    }

    /// Create a category, storing its icon first when one was uploaded
    #[instrument(skip(self, request, icon))]
    pub async fn create_category(
        &self,
        user_id: RecordId,
        request: CreateCategoryRequest,
        icon: FileChange,
    ) -> ServiceResult<CategoryResponse> {
        request.validate()?;
        validate_uploads(&[(FileField::CategoryIcon, &icon)])?;

        let mut category = Category::new(self.ctx.generate_id(), request.name);
        category.description = request.description.filter(|d| !d.is_empty());

        let guard = self.ctx.upload_guard();
        let stored = guard
            .apply(FileField::CategoryIcon, category.id, &icon, &mut category.icon)
            .await?;

        if let Err(e) = self.ctx.category_repo().create(&category).await {
            guard.discard(stored.as_slice()).await;
            return Err(e.into());
        }

        info!(category_id = %category.id, user_id = %user_id, "Category created");
        Ok(CategoryResponse::from(category))
    }

    /// Update a category; the icon it no longer references is deleted
    #[instrument(skip(self, request, icon))]
    pub async fn update_category(
        &self,
        category_id: RecordId,
        user_id: RecordId,
        request: UpdateCategoryRequest,
        icon: FileChange,
    ) -> ServiceResult<CategoryResponse> {
        request.validate()?;
        validate_uploads(&[(FileField::CategoryIcon, &icon)])?;

        let previous = self.load(category_id).await?;
        let mut category = previous.clone();

        if let Some(name) = request.name {
            category.name = name;
        }
        if let Some(description) = request.description {
            category.description = Some(description).filter(|d| !d.is_empty());
        }

        let guard = self.ctx.upload_guard();
        let stored = guard
            .apply(FileField::CategoryIcon, category_id, &icon, &mut category.icon)
            .await?;

        if let Err(e) = self.ctx.category_repo().update(&category).await {
            guard.discard_new(stored.as_slice(), &previous).await;
            return Err(e.into());
        }

        if let Err(e) = guard.cleanup_replaced(&previous, &category).await {
            warn!(category_id = %category_id, error = %e, "Stale category icon left behind");
        }

        info!(category_id = %category_id, user_id = %user_id, "Category updated");
        Ok(CategoryResponse::from(category))
    }

    /// Delete a category and its servers, then their files
    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: RecordId, user_id: RecordId) -> ServiceResult<()> {
        let category = self.load(category_id).await?;
        let servers = self.ctx.category_repo().delete(category_id).await?;

        let guard = self.ctx.upload_guard();
        if let Err(e) = guard.cleanup_on_delete(&category).await {
            warn!(category_id = %category_id, error = %e, "Category icon left behind");
        }
        for server in &servers {
            if let Err(e) = guard.cleanup_on_delete(server).await {
                warn!(server_id = %server.id, error = %e, "Server files left behind");
            }
        }

        info!(
            category_id = %category_id,
            user_id = %user_id,
            servers = servers.len(),
            "Category deleted"
        );
        Ok(())
    }

    async fn load(&self, category_id: RecordId) -> ServiceResult<Category> {
        self.ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))
    }
}
