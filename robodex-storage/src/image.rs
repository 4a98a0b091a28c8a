//! Image store implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use robodex_core::StorageError;

use crate::{ImageStore, StorageResult};

/// Image store writing files into a single upload directory.
#[derive(Debug, Clone)]
pub struct DirImageStore {
    dir: PathBuf,
}

impl DirImageStore {
    /// Open the upload directory, creating it if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Write {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for DirImageStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> StorageResult<()> {
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Image saved");
        Ok(())
    }
}

/// In-memory image store for testing.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `file_name`, if any.
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files
            .read()
            .ok()
            .and_then(|files| files.get(file_name).cloned())
    }

    /// Stored file names in sorted order.
    pub fn file_names(&self) -> Vec<String> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> StorageResult<()> {
        let mut files = self.files.write().map_err(|_| StorageError::LockPoisoned)?;
        files.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}
