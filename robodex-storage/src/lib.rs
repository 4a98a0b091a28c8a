//! Robodex Storage - Storage Traits and Implementations
//!
//! Defines the persistence seams used by the robot service:
//! - [`RecordStore`]: the whole ordered robot list, loaded and replaced as a unit
//! - [`ImageStore`]: a flat namespace of uploaded image files
//!
//! Each seam has a disk-backed implementation for the server and an
//! in-memory one for tests.

pub mod image;
pub mod record;

pub use image::{DirImageStore, MemoryImageStore};
pub use record::{JsonFileStore, MemoryRecordStore};

use async_trait::async_trait;
use robodex_core::{Robot, StorageError};

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================================
// STORAGE TRAITS
// ============================================================================

/// Persistence for the ordered robot sequence.
///
/// There is no incremental API: callers load everything, mutate in memory and
/// write everything back. Nothing serializes concurrent load/replace cycles.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the full record sequence.
    async fn load(&self) -> StorageResult<Vec<Robot>>;

    /// Overwrite the persisted sequence with `records`.
    async fn replace_all(&self, records: &[Robot]) -> StorageResult<()>;
}

/// Sink for uploaded image bytes, keyed by file name.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `file_name`, replacing any existing file.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> StorageResult<()>;
}
