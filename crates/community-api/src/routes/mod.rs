//! Route definitions
//!
//! API routes are mounted under /api/v1; uploaded files are served from
//! /media and the OpenAPI UI from /api/docs.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{categories, channels, health, members, servers};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main API router (health, media and docs are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Stored uploads, served under the same prefix their URLs use
pub fn media_routes(upload_dir: &str) -> Router<AppState> {
    Router::new().nest_service("/media", ServeDir::new(upload_dir))
}

/// Swagger UI and the raw OpenAPI document
pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(category_routes())
        .merge(server_routes())
        .merge(channel_routes())
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:category_id",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
}

fn server_routes() -> Router<AppState> {
    Router::new()
        // Listing
        .route("/server/select", get(servers::list_servers))
        // Server CRUD
        .route("/servers", post(servers::create_server))
        .route(
            "/servers/:server_id",
            get(servers::get_server)
                .patch(servers::update_server)
                .delete(servers::delete_server),
        )
        // Server channels
        .route(
            "/servers/:server_id/channels",
            get(channels::get_server_channels).post(channels::create_channel),
        )
        // Membership
        .route(
            "/servers/:server_id/members/@me",
            put(members::join_server).delete(members::leave_server),
        )
}

fn channel_routes() -> Router<AppState> {
    Router::new().route(
        "/channels/:channel_id",
        get(channels::get_channel)
            .patch(channels::update_channel)
            .delete(channels::delete_channel),
    )
}
