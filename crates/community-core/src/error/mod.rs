//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Category not found: {0}")]
    CategoryNotFound(RecordId),

    #[error("Server not found: {0}")]
    ServerNotFound(RecordId),

    #[error("Channel not found: {0}")]
    ChannelNotFound(RecordId),

    #[error("Not a member of this server")]
    MemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported file extension")]
    UnsupportedFileExtension,

    #[error("The maximum allowed dimensions for the image are 70x70 The size of the image you uploaded: ({width}, {height})")]
    IconTooLarge { width: u32, height: u32 },

    #[error("Description too long: max {max} characters")]
    DescriptionTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not server owner")]
    NotServerOwner,

    #[error("Not channel owner")]
    NotChannelOwner,

    // =========================================================================
    // Conflict / Business Rule Errors
    // =========================================================================
    #[error("Already a member of this server")]
    AlreadyMember,

    #[error("Cannot leave owned server")]
    CannotLeaveOwnedServer,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ServerNotFound(_) => "UNKNOWN_SERVER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MemberNotFound => "UNKNOWN_MEMBER",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnsupportedFileExtension => "UNSUPPORTED_FILE_EXTENSION",
            Self::IconTooLarge { .. } => "ICON_TOO_LARGE",
            Self::DescriptionTooLong { .. } => "DESCRIPTION_TOO_LONG",

            Self::NotServerOwner => "NOT_SERVER_OWNER",
            Self::NotChannelOwner => "NOT_CHANNEL_OWNER",

            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::CannotLeaveOwnedServer => "CANNOT_LEAVE_OWNED_SERVER",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::ServerNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MemberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::UnsupportedFileExtension
                | Self::IconTooLarge { .. }
                | Self::DescriptionTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotServerOwner | Self::NotChannelOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyMember | Self::CannotLeaveOwnedServer)
    }
}
