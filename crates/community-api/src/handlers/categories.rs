//! Category handlers
//!
//! Categories are edited with multipart forms so an icon can travel with
//! the text fields.

use axum::{extract::State, Json};
use community_service::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use community_service::CategoryService;

use crate::extractors::{AuthUser, IdPath, MultipartForm};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

/// List every category
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = CATEGORY_TAG,
    responses((status = 200, description = "All categories", body = [CategoryResponse])),
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    Ok(Json(service.list_categories().await?))
}

/// GET /categories/{category_id}
pub async fn get_category(
    State(state): State<AppState>,
    IdPath(category_id): IdPath,
) -> ApiResult<Json<CategoryResponse>> {
    let service = CategoryService::new(state.service_context());
    Ok(Json(service.get_category(category_id).await?))
}

/// Create a category
///
/// POST /categories (multipart: `name`, `description`, `icon`)
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid fields or icon", body = ErrorBody),
        (status = 401, description = "No valid token", body = ErrorBody)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let request = CreateCategoryRequest {
        name: form.require_text("name")?,
        description: form.take_text("description"),
    };
    let icon = form.file_change("icon", "clear_icon");

    let service = CategoryService::new(state.service_context());
    let response = service.create_category(auth.user_id, request, icon).await?;
    Ok(Created(Json(response)))
}

/// Update a category
///
/// PATCH /categories/{category_id} (multipart; absent fields are unchanged,
/// `clear_icon=true` removes the icon)
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(category_id): IdPath,
    mut form: MultipartForm,
) -> ApiResult<Json<CategoryResponse>> {
    let request = UpdateCategoryRequest {
        name: form.take_text("name"),
        description: form.take_text("description"),
    };
    let icon = form.file_change("icon", "clear_icon");

    let service = CategoryService::new(state.service_context());
    let response = service
        .update_category(category_id, auth.user_id, request, icon)
        .await?;
    Ok(Json(response))
}

/// Delete a category, its servers, and their files
///
/// DELETE /categories/{category_id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(category_id): IdPath,
) -> ApiResult<NoContent> {
    let service = CategoryService::new(state.service_context());
    service.delete_category(category_id, auth.user_id).await?;
    Ok(NoContent)
}
