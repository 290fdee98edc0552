//! OpenAPI document served at `/api/docs`

use community_service::dto::{
    CategoryResponse, ChannelResponse, HealthChecks, HealthResponse, ReadinessResponse,
    ServerResponse,
};
use utoipa::OpenApi;

use crate::handlers::{categories, health, servers};
use crate::response::{ErrorBody, ErrorDetail};

#[derive(OpenApi)]
#[openapi(
    info(title = "Community API", description = "Categories, servers and channels"),
    paths(
        servers::list_servers,
        servers::create_server,
        categories::list_categories,
        categories::create_category,
        health::health_check,
        health::readiness_check,
    ),
    components(schemas(
        ServerResponse,
        ChannelResponse,
        CategoryResponse,
        HealthResponse,
        ReadinessResponse,
        HealthChecks,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "server", description = "Server listing and management"),
        (name = "category", description = "Server categories"),
        (name = "health", description = "Liveness and readiness checks"),
    )
)]
pub struct ApiDoc;
