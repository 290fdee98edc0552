//! Stored file references and the upload layout

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

/// Public URL prefix the upload root is served under
pub const MEDIA_URL_PREFIX: &str = "/media/";

/// Storage-relative path of an uploaded file, e.g. `server/42/server_icons/logo.png`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(String);

impl FileRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path component
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// URL the file is served at
    pub fn url(&self) -> String {
        format!("{MEDIA_URL_PREFIX}{}", self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A file-bearing field on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileField {
    CategoryIcon,
    ServerIcon,
    ServerBanner,
}

impl FileField {
    /// Name of the form field carrying the upload
    pub fn field_name(self) -> &'static str {
        match self {
            Self::CategoryIcon | Self::ServerIcon => "icon",
            Self::ServerBanner => "banner",
        }
    }

    /// Whether uploads must be a `.jpg`, `.jpeg` or `.png` image
    ///
    /// Category icons are stored as sent.
    pub fn is_validated(self) -> bool {
        matches!(self, Self::ServerIcon | Self::ServerBanner)
    }

    /// Whether the 70x70 icon dimension limit applies
    pub fn is_icon(self) -> bool {
        matches!(self, Self::ServerIcon)
    }

    fn directory(self) -> &'static str {
        match self {
            Self::CategoryIcon => "category_icon",
            Self::ServerIcon => "server_icons",
            Self::ServerBanner => "server_banners",
        }
    }

    fn owner_kind(self) -> &'static str {
        match self {
            Self::CategoryIcon => "category",
            Self::ServerIcon | Self::ServerBanner => "server",
        }
    }

    /// Storage path for an upload attached to record `id`
    ///
    /// Only the last component of the client supplied name is kept and any
    /// character outside `[A-Za-z0-9._-]` becomes `_`.
    pub fn upload_path(self, id: RecordId, filename: &str) -> FileRef {
        FileRef(format!(
            "{}/{}/{}/{}",
            self.owner_kind(),
            id,
            self.directory(),
            sanitize_filename(filename)
        ))
    }
}

fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // "." and ".." would escape the record directory
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}
