//! # community-core
//!
//! Domain layer containing entities, value objects, and the repository and
//! storage traits. This crate has zero dependencies on infrastructure
//! (database, web framework, file system).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Category, Channel, Server};
pub use error::DomainError;
pub use traits::{
    CategoryRepository, ChannelRepository, FileStorage, ManagedFiles, RepoResult,
    ServerRepository, ServerWithCategory,
};
pub use value_objects::{FileField, FileRef, IdGenerator, RecordId, RecordIdParseError};
