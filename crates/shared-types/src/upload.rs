use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Most images a single issue report may carry.
pub const MAX_ISSUE_IMAGES: usize = 5;

/// Per-image size cap.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Key prefix for issue images in the blob store.
pub const ISSUE_IMAGE_PREFIX: &str = "issues";

// ---------------------------------------------------------------------------
// Client-side selection
// ---------------------------------------------------------------------------

/// An image picked in the report form, held in memory until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Ordered set of images chosen for one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSelection {
    images: Vec<SelectedImage>,
}

impl ImageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of picked files. A batch that would push the total
    /// past [`MAX_ISSUE_IMAGES`] is refused whole and the selection is left
    /// untouched.
    pub fn try_add(&mut self, batch: Vec<SelectedImage>) -> Result<(), AppError> {
        if self.images.len() + batch.len() > MAX_ISSUE_IMAGES {
            return Err(AppError::field(
                "images",
                format!("You can only upload up to {} images", MAX_ISSUE_IMAGES),
            ));
        }
        self.images.extend(batch);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedImage> {
        self.images.iter()
    }
}

/// Whole-number percentage of a sequential upload, never above 100.
pub fn upload_progress(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed.min(total) * 100) / total) as u8
}

// ---------------------------------------------------------------------------
// Blob naming and validation
// ---------------------------------------------------------------------------

/// Object key for an uploaded image: `issues/{millis}_{file name}`.
///
/// Path separators and anything outside `[A-Za-z0-9._-]` become `_`.
pub fn blob_name(millis: i64, file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let mut sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        sanitized.push_str("image");
    }
    format!("{}/{}_{}", ISSUE_IMAGE_PREFIX, millis, sanitized)
}

pub fn validate_image(content_type: &str, size: usize) -> Result<(), AppError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(AppError::bad_request(format!(
            "Unsupported image type '{}'. Allowed: JPEG, PNG, WebP, GIF",
            content_type
        )));
    }
    if size == 0 {
        return Err(AppError::bad_request("Image file is empty"));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AppError::bad_request(format!(
            "Image exceeds the {} MB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// Image upload carried as base64 so it survives a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImageUploadRequest {
    pub file_name: String,
    pub content_type: String,
    /// Base64-encoded file bytes.
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImageUploadResponse {
    pub key: String,
    pub url: String,
}
