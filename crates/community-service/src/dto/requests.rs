//! Request DTOs for API endpoints
//!
//! Text fields are validated with `validator`; uploaded files travel
//! separately as [`crate::uploads::FileChange`] values.

use community_core::RecordId;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// ============================================================================
// Category Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,

    pub description: Option<String>,
}

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: Option<String>,

    /// An empty string clears the description
    pub description: Option<String>,
}

// ============================================================================
// Server Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServerRequest {
    #[validate(length(min = 1, max = 100, message = "Server name must be 1-100 characters"))]
    pub name: String,

    pub category_id: RecordId,

    #[validate(length(max = 250, message = "Description must be at most 250 characters"))]
    pub description: Option<String>,
}

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateServerRequest {
    #[validate(length(min = 1, max = 100, message = "Server name must be 1-100 characters"))]
    pub name: Option<String>,

    pub category_id: Option<RecordId>,

    /// An empty string clears the description
    #[validate(length(max = 250, message = "Description must be at most 250 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Channel Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateChannelRequest {
    /// Stored lower-cased
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Topic must be at most 100 characters"))]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "Topic must be at most 100 characters"))]
    pub topic: Option<String>,
}

// ============================================================================
// Server Listing
// ============================================================================

/// Query parameters of the server listing endpoint
///
/// Values are kept as raw strings; interpretation happens in
/// [`crate::listing::ServerListQuery`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServerListParams {
    /// Keep only servers in the category with this exact name
    pub category: Option<String>,

    /// Return at most this many servers
    #[param(value_type = Option<u32>)]
    pub qty: Option<String>,

    /// `true` keeps only servers the caller is a member of (requires a token)
    #[param(value_type = Option<bool>)]
    pub by_user: Option<String>,

    /// Keep only the server with this id (`by_server_id` is accepted too)
    #[serde(alias = "by_server_id")]
    #[param(value_type = Option<String>)]
    pub by_serverid: Option<String>,

    /// `true` adds `num_members` to each server
    #[param(value_type = Option<bool>)]
    pub with_num_members: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_description_limit() {
        let request = CreateServerRequest {
            name: "ok".to_string(),
            category_id: RecordId::new(1),
            description: Some("x".repeat(251)),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));

        let request = CreateServerRequest {
            description: Some("x".repeat(250)),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_channel_name_bounds() {
        let request = CreateChannelRequest {
            name: String::new(),
            topic: None,
        };
        assert!(request.validate().is_err());

        let request = CreateChannelRequest {
            name: "n".repeat(101),
            topic: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_list_params_alias() {
        let params: ServerListParams =
            serde_json::from_str(r#"{"by_server_id":"7","qty":"2"}"#).unwrap();
        assert_eq!(params.by_serverid.as_deref(), Some("7"));
        assert_eq!(params.qty.as_deref(), Some("2"));
    }

    #[test]
    fn test_category_id_accepts_string() {
        let request: CreateServerRequest =
            serde_json::from_str(r#"{"name":"a","category_id":"42"}"#).unwrap();
        assert_eq!(request.category_id, RecordId::new(42));
    }
}
