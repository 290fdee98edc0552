//! Ports the infrastructure layer implements

mod files;
mod repositories;

pub use files::{FileStorage, ManagedFiles};
pub use repositories::{
    CategoryRepository, ChannelRepository, RepoResult, ServerRepository, ServerWithCategory,
};
