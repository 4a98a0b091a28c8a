//! Robodex Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Fixtures for robots and uploads
//! - Proptest generators
//! - A multipart/form-data body builder for HTTP tests
//! - Store doubles that fail on demand

// Re-export in-memory stores from their source crate
pub use robodex_storage::{MemoryImageStore, MemoryRecordStore, RecordStore, StorageResult};

pub use robodex_core::{image_url, ImageUpload, Robot, RobotPatch, StorageError};

use async_trait::async_trait;
use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// A deterministic robot whose fields all carry `n`.
pub fn sample_robot(n: usize) -> Robot {
    Robot::new(
        format!("author-{}", n),
        format!("robot-{}", n),
        format!("description-{}", n),
        vec![image_url(&format!("robot-{}.png", n))],
    )
}

/// `count` sample robots, numbered from zero.
pub fn sample_robots(count: usize) -> Vec<Robot> {
    (0..count).map(sample_robot).collect()
}

/// A small PNG-typed upload.
pub fn png_upload(file_name: &str) -> ImageUpload {
    ImageUpload::new(file_name, Some("image/png"), b"\x89PNG\r\n\x1a\n".to_vec())
}

/// A plain-text upload, rejected by the ingestor.
pub fn text_upload(file_name: &str) -> ImageUpload {
    ImageUpload::new(file_name, Some("text/plain"), b"not an image".to_vec())
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Non-empty printable text for robot fields.
pub fn arb_field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 _-]{0,15}"
}

/// A plain file name with an image extension.
pub fn arb_image_name() -> impl Strategy<Value = String> {
    ("[a-z0-9]{1,10}", prop::sample::select(vec!["png", "jpg", "gif", "webp"]))
        .prop_map(|(stem, ext)| format!("{}.{}", stem, ext))
}

/// A stored robot with up to three image paths.
pub fn arb_robot() -> impl Strategy<Value = Robot> {
    (
        arb_field(),
        arb_field(),
        arb_field(),
        prop::collection::vec(arb_image_name(), 0..3),
    )
        .prop_map(|(author, name, description, files)| {
            let images = files.iter().map(|f| image_url(f)).collect();
            Robot::new(author, name, description, images)
        })
}

/// A list of up to `max` robots.
pub fn arb_robots(max: usize) -> impl Strategy<Value = Vec<Robot>> {
    prop::collection::vec(arb_robot(), 0..=max)
}

// ============================================================================
// MULTIPART BODIES
// ============================================================================

pub const MULTIPART_BOUNDARY: &str = "robodex-test-boundary";

/// Builder for `multipart/form-data` request bodies.
#[derive(Debug, Default, Clone)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                MULTIPART_BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file part.
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                MULTIPART_BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append an upload as an `images` file part.
    pub fn image(self, upload: &ImageUpload) -> Self {
        let content_type = upload
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        self.file("images", &upload.file_name, &content_type, &upload.bytes)
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
    }

    /// Finish the body with the closing boundary.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        self.body
    }
}

// ============================================================================
// STORE DOUBLES
// ============================================================================

/// Record store whose every call fails as if the file were corrupt.
#[derive(Debug, Default, Clone, Copy)]
pub struct CorruptRecordStore;

#[async_trait]
impl RecordStore for CorruptRecordStore {
    async fn load(&self) -> StorageResult<Vec<Robot>> {
        Err(corrupt_error())
    }

    async fn replace_all(&self, _records: &[Robot]) -> StorageResult<()> {
        Err(corrupt_error())
    }
}

fn corrupt_error() -> StorageError {
    let source = serde_json::from_str::<Vec<Robot>>("{").expect_err("unterminated object");
    StorageError::Corrupt {
        path: "robots.json".into(),
        source,
    }
}
