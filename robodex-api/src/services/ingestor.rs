//! Image Ingestor
//!
//! Validates uploaded files and writes the accepted ones to the image store,
//! returning their public URL paths in input order.
//!
//! A batch is not atomic: files saved before a rejected one stay on disk.

use std::sync::Arc;

use robodex_core::{image_url, ImageUpload, RobotError, RobotResult};
use robodex_storage::ImageStore;

/// How a batch reacts to a file that is not an acceptable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Fail the whole call on the first rejected file.
    Strict,
    /// Drop rejected files and keep ingesting the rest.
    SkipInvalid,
}

/// Validates and persists image uploads.
#[derive(Clone)]
pub struct ImageIngestor {
    store: Arc<dyn ImageStore>,
}

impl ImageIngestor {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }

    /// Save every acceptable file and return `/static/images/<name>` paths.
    pub async fn ingest(&self, files: &[ImageUpload], mode: IngestMode) -> RobotResult<Vec<String>> {
        let mut paths = Vec::with_capacity(files.len());

        for file in files {
            let name = match stored_file_name(&file.file_name).filter(|_| file.is_image()) {
                Some(name) => name,
                None if mode == IngestMode::SkipInvalid => {
                    tracing::warn!(
                        file_name = %file.file_name,
                        content_type = ?file.content_type,
                        "Skipping non-image upload"
                    );
                    continue;
                }
                None => {
                    return Err(RobotError::InvalidFileFormat {
                        file_name: file.file_name.clone(),
                    });
                }
            };

            self.store.save(name, &file.bytes).await?;
            paths.push(image_url(name));
        }

        Ok(paths)
    }
}

/// Reduce a client-supplied file name to its final path component.
///
/// Returns `None` for names that cannot be stored as a plain file.
pub fn stored_file_name(raw: &str) -> Option<&str> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}
