//! # community-service
//!
//! Application layer: upload validation and lifecycle, the server listing
//! pipeline, record management services, and DTOs.

pub mod dto;
pub mod listing;
pub mod services;
pub mod uploads;

#[cfg(test)]
pub(crate) mod testing;

pub use listing::{ListingError, ServerListQuery};
pub use services::{
    CategoryService, ChannelService, MemberService, ServerListingService, ServerService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
pub use uploads::{FileChange, Upload, UploadGuard};
