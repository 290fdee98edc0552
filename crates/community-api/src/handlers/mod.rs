//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod categories;
pub mod channels;
pub mod health;
pub mod members;
pub mod servers;
