//! Model to entity mappers
//!
//! - `From<Model> for Entity` for tables that map one row to one entity
//! - `ServerParts` for servers, whose member set comes from a second table

mod category;
mod channel;
mod server;

pub use server::{group_members, ServerParts};
