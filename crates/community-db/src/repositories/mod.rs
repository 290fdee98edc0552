//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in community-core.

mod category;
mod channel;
mod error;
mod server;

pub use category::PgCategoryRepository;
pub use channel::PgChannelRepository;
pub use server::PgServerRepository;
