//! Server listing pipeline
//!
//! Query parameters are parsed into a [`ServerListQuery`], then the full,
//! id-ordered server collection is passed through a fixed sequence of pure
//! stages (see [`STAGES`]). Any stage may fail, which ends the request.

mod error;
mod query;
mod stages;

pub use error::ListingError;
pub use query::ServerListQuery;
pub use stages::{run_pipeline, ListedServer, Stage, STAGES};
