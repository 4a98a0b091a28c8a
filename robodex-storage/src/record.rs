//! Record store implementations.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use robodex_core::{Robot, StorageError};

use crate::{RecordStore, StorageResult};

// ============================================================================
// JSON FILE STORE
// ============================================================================

/// Record store backed by a single pretty-printed JSON array on disk.
///
/// Every write rewrites the whole file. A crash mid-write can leave it
/// truncated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`, initializing it to `[]` if the file is missing.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let store = Self { path: path.into() };

        let exists = tokio::fs::try_exists(&store.path)
            .await
            .map_err(|source| StorageError::Read {
                path: store.path.clone(),
                source,
            })?;

        if !exists {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StorageError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
            store.replace_all(&[]).await?;
            tracing::info!(path = %store.path.display(), "Initialized empty record file");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> StorageResult<Vec<Robot>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn replace_all(&self, records: &[Robot]) -> StorageResult<()> {
        let encoded = serde_json::to_string_pretty(records).map_err(StorageError::Encode)?;

        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Record file rewritten");
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory record store for testing.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<Robot>>,
    writes: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: Vec<Robot>) -> Self {
        Self {
            records: RwLock::new(records),
            writes: AtomicUsize::new(0),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Robot> {
        match self.records.read() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of `replace_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load(&self) -> StorageResult<Vec<Robot>> {
        let records = self.records.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(records.clone())
    }

    async fn replace_all(&self, records: &[Robot]) -> StorageResult<()> {
        let mut stored = self.records.write().map_err(|_| StorageError::LockPoisoned)?;
        *stored = records.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn robot(n: usize) -> Robot {
        Robot::new(
            format!("author-{}", n),
            format!("robot-{}", n),
            "test unit",
            vec![format!("/static/images/r{}.png", n)],
        )
    }

    #[tokio::test]
    async fn test_open_initializes_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("robots.json");

        let store = JsonFileStore::open(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robots.json");
        std::fs::write(
            &path,
            r#"[{"author":"a","name":"n","description":"d","images":[]}]"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let records = store.load().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "n");
    }

    #[tokio::test]
    async fn test_replace_all_writes_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("robots.json"))
            .await
            .unwrap();

        store.replace_all(&[robot(1)]).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"author\": \"author-1\""));
        assert!(raw.contains("    \"images\": [\n      \"/static/images/r1.png\"\n    ]"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_corrupt_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robots.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let err = store.load().await.unwrap_err();

        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_counts_writes() {
        let store = MemoryRecordStore::with_records(vec![robot(1)]);
        assert_eq!(store.write_count(), 0);

        let mut records = store.load().await.unwrap();
        records.push(robot(2));
        store.replace_all(&records).await.unwrap();

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.snapshot(), vec![robot(1), robot(2)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Rewriting what was loaded leaves the logical content unchanged.
        #[test]
        fn prop_replace_all_of_load_is_noop(
            rows in prop::collection::vec(
                ("[a-z]{1,8}", "[A-Za-z0-9 ]{1,12}", ".{0,24}", prop::collection::vec("[a-z]{1,6}\\.png", 0..3)),
                0..6,
            )
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let dir = TempDir::new().unwrap();

            runtime.block_on(async {
                let store = JsonFileStore::open(dir.path().join("robots.json")).await.unwrap();
                let records: Vec<Robot> = rows
                    .into_iter()
                    .map(|(author, name, description, files)| {
                        Robot::new(author, name, description, files.iter().map(|f| robodex_core::image_url(f)).collect())
                    })
                    .collect();
                store.replace_all(&records).await.unwrap();

                let before = store.load().await.unwrap();
                store.replace_all(&before).await.unwrap();
                let after = store.load().await.unwrap();

                prop_assert_eq!(&before, &records);
                prop_assert_eq!(before, after);
                Ok(())
            })?;
        }
    }
}
