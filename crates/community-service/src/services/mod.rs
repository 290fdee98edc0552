//! Business logic services
//!
//! Services validate input, enforce ownership rules, persist through the
//! repository ports and keep stored uploads in step with the records.

pub mod category;
pub mod channel;
pub mod context;
pub mod error;
pub mod listing;
pub mod member;
pub mod server;

pub use category::CategoryService;
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use listing::ServerListingService;
pub use member::MemberService;
pub use server::ServerService;
