//! Server database models

use sqlx::FromRow;

/// Row of the servers table
#[derive(Debug, Clone, FromRow)]
pub struct ServerModel {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub category_id: i64,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub icon: Option<String>,
}

/// Server row joined with its category name
#[derive(Debug, Clone, FromRow)]
pub struct ServerListingModel {
    #[sqlx(flatten)]
    pub server: ServerModel,
    pub category_name: String,
}

/// Row of the server_members table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ServerMemberModel {
    pub server_id: i64,
    pub user_id: i64,
}
