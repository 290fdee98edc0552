//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path ids, validated JSON, and
//! multipart forms carrying uploads.

mod auth;
mod multipart;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use multipart::MultipartForm;
pub use path::IdPath;
pub use validated::ValidatedJson;
