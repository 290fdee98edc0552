//! Image upload validators

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use community_core::{DomainError, FileField};
use image::ImageReader;
use validator::{ValidationError, ValidationErrors};

use super::{FileChange, Upload};

/// Accepted file extensions, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Largest icon width and height in pixels
pub const MAX_ICON_DIMENSION: u32 = 70;

const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// Reject names whose extension is not `.jpg`, `.jpeg`, or `.png`
pub fn validate_image_file_extension(filename: &str) -> Result<(), DomainError> {
    let allowed = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });

    if allowed {
        Ok(())
    } else {
        Err(DomainError::UnsupportedFileExtension)
    }
}

/// Reject icons wider or taller than 70 pixels
pub fn validate_icon_image_size(bytes: &[u8]) -> Result<(), DomainError> {
    let (width, height) = image_dimensions(bytes)?;
    if width > MAX_ICON_DIMENSION || height > MAX_ICON_DIMENSION {
        return Err(DomainError::IconTooLarge { width, height });
    }
    Ok(())
}

/// Run every check that applies to `field`
pub fn validate_upload(field: FileField, upload: &Upload) -> Result<(), DomainError> {
    if !field.is_validated() {
        return Ok(());
    }
    validate_image_file_extension(&upload.filename)?;
    if field.is_icon() {
        validate_icon_image_size(&upload.bytes)
    } else {
        image_dimensions(&upload.bytes).map(|_| ())
    }
}

/// Validate every replaced field, collecting failures by form field name
pub fn validate_uploads(changes: &[(FileField, &FileChange)]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for (field, change) in changes {
        if let Some(upload) = change.upload() {
            if let Err(e) = validate_upload(*field, upload) {
                errors.add(field.field_name(), field_error(&e));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), DomainError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| DomainError::ValidationError(INVALID_IMAGE.to_string()))?
        .into_dimensions()
        .map_err(|_| DomainError::ValidationError(INVALID_IMAGE.to_string()))
}

fn field_error(err: &DomainError) -> ValidationError {
    let code = match err {
        DomainError::UnsupportedFileExtension => "unsupported_extension",
        DomainError::IconTooLarge { .. } => "image_too_large",
        _ => "invalid_image",
    };
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(err.to_string()));
    error
}
