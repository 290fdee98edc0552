//! Value objects - immutable types that represent domain concepts

mod file_ref;
mod record_id;

pub use file_ref::{FileField, FileRef, MEDIA_URL_PREFIX};
pub use record_id::{IdGenerator, RecordId, RecordIdParseError};
