//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from domain entities to response DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCategoryRequest, CreateChannelRequest, CreateServerRequest, ServerListParams,
    UpdateCategoryRequest, UpdateChannelRequest, UpdateServerRequest,
};
pub use mappers::ServerView;
pub use responses::{
    CategoryResponse, ChannelResponse, HealthChecks, HealthResponse, ReadinessResponse,
    ServerResponse,
};
