//! Listing failures

use thiserror::Error;

/// Errors raised by the listing pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// `by_user=true` without a caller identity
    #[error("User not logged in")]
    AuthenticationRequired,

    /// A parameter value could not be interpreted
    #[error("{0}")]
    InvalidParameter(String),

    /// `by_serverid` matched nothing in the filtered set
    #[error("Server with id {0} not found")]
    NotFound(String),
}

impl ListingError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AuthenticationRequired => 401,
            Self::InvalidParameter(_) | Self::NotFound(_) => 400,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::NotFound(_) => "SERVER_NOT_FOUND",
        }
    }
}
