//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod channel;
mod server;

pub use category::CategoryModel;
pub use channel::ChannelModel;
pub use server::{ServerListingModel, ServerMemberModel, ServerModel};
