//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Record ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// Category Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Media URL of the icon
    pub icon: Option<String>,
}

// ============================================================================
// Server Responses
// ============================================================================

/// A server as returned by the listing and record endpoints
///
/// The member list itself is never serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServerResponse {
    pub id: String,
    pub name: String,
    /// Owner user id
    pub owner: String,
    /// Category name
    pub category: String,
    pub description: Option<String>,
    /// Media URL of the icon
    pub icon: Option<String>,
    /// Media URL of the banner
    pub banner: Option<String>,
    pub channel_server: Vec<ChannelResponse>,
    /// Present only when member counts were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_members: Option<usize>,
}

// ============================================================================
// Channel Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub topic: String,
    /// Owner user id
    pub owner: String,
    /// Server id
    pub server: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        let status = if database { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks { database },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database
    }
}
