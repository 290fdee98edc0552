//! # community-db
//!
//! Infrastructure layer implementing the `community-core` ports.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - PostgreSQL repository implementations
//! - Local-disk file storage for uploads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use community_db::{create_pool, run_migrations, DatabaseConfig, PgServerRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let servers = PgServerRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod storage;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgCategoryRepository, PgChannelRepository, PgServerRepository};
pub use storage::LocalFileStorage;
