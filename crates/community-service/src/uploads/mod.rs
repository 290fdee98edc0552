//! Uploaded files: validation before anything is stored, and the lifecycle
//! guard that removes files a record no longer references.

mod guard;
mod validators;

pub use guard::UploadGuard;
pub use validators::{
    validate_icon_image_size, validate_image_file_extension, validate_upload, validate_uploads,
    ALLOWED_EXTENSIONS, MAX_ICON_DIMENSION,
};

/// A file received from a client
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// Name as sent by the client
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("filename", &self.filename)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// What an update does to one file field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileChange {
    /// Leave the current file in place
    #[default]
    Keep,
    /// Detach the current file without a replacement
    Clear,
    /// Attach a new file
    Replace(Upload),
}

impl FileChange {
    pub fn upload(&self) -> Option<&Upload> {
        match self {
            Self::Replace(upload) => Some(upload),
            Self::Keep | Self::Clear => None,
        }
    }
}

impl From<Option<Upload>> for FileChange {
    fn from(upload: Option<Upload>) -> Self {
        upload.map_or(Self::Keep, Self::Replace)
    }
}
