//! Domain entities - core business objects

mod category;
mod channel;
mod server;

pub use category::Category;
pub use channel::{Channel, CHANNEL_NAME_MAX, CHANNEL_TOPIC_MAX};
pub use server::{Server, SERVER_DESCRIPTION_MAX};
