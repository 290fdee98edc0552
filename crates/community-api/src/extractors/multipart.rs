//! Multipart form extractor
//!
//! Collects text fields and uploaded files from a `multipart/form-data`
//! body. Parts sent without a filename are text; file parts with an empty
//! filename or no bytes count as "no file selected".

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use community_core::RecordId;
use community_service::{FileChange, Upload};

use crate::response::ApiError;

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl MultipartForm {
    /// Text value of `name`, if sent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text value of `name`, owned
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Text value of `name`, failing when absent
    pub fn require_text(&mut self, name: &str) -> Result<String, ApiError> {
        self.take_text(name)
            .ok_or_else(|| ApiError::invalid_body(format!("Missing form field: {name}")))
    }

    /// Record id in field `name`, if sent
    pub fn take_id(&mut self, name: &str) -> Result<Option<RecordId>, ApiError> {
        self.take_text(name)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                RecordId::parse(raw.trim())
                    .map_err(|_| ApiError::invalid_body(format!("Invalid {name}: {raw}")))
            })
            .transpose()
    }

    /// What to do with file field `name`
    ///
    /// An uploaded file replaces the current one; otherwise `<clear_key>=true`
    /// removes it; otherwise it is kept.
    pub fn file_change(&mut self, name: &str, clear_key: &str) -> FileChange {
        match self.files.remove(name) {
            Some(upload) => FileChange::Replace(upload),
            None if self.text(clear_key) == Some("true") => FileChange::Clear,
            None => FileChange::Keep,
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                    if !filename.is_empty() && !bytes.is_empty() {
                        form.files.insert(name, Upload::new(filename, bytes.to_vec()));
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }
}
