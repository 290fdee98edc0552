//! Test fixtures and data generators
//!
//! Provides reusable request bodies, upload files and response shapes.

use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{ImageFormat, RgbImage};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    format!(
        "{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// PNG bytes of the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes
}

/// File part for a multipart form
pub fn file_part(filename: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("image/png")
        .expect("Valid mime type")
}

/// Category form with a unique name
pub fn category_form(name_prefix: &str) -> (String, Form) {
    let name = format!("{name_prefix} {}", unique_suffix());
    let form = Form::new()
        .text("name", name.clone())
        .text("description", "Integration test category");
    (name, form)
}

/// Server form with a unique name
pub fn server_form(category_id: &str) -> (String, Form) {
    let name = format!("Server {}", unique_suffix());
    let form = Form::new()
        .text("name", name.clone())
        .text("category_id", category_id.to_string());
    (name, form)
}

/// Create channel request
#[derive(Debug, Serialize)]
pub struct CreateChannelRequest {
    pub name: String,
    pub topic: Option<String>,
}

impl CreateChannelRequest {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            topic: Some("Test topic".to_string()),
        }
    }
}

/// Category response
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Server response
#[derive(Debug, Deserialize)]
pub struct ServerResponse {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub category: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub banner: Option<String>,
    pub channel_server: Vec<ChannelResponse>,
    pub num_members: Option<usize>,
}

/// Channel response
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub topic: String,
    pub owner: String,
    pub server: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
