//! Error types for Robodex operations

use std::path::PathBuf;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Record file {path} is not a valid robot list: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Master error type for robot operations.
#[derive(Debug, Error)]
pub enum RobotError {
    #[error("Missing fields")]
    MissingFields,

    #[error("Invalid file format")]
    InvalidFileFormat { file_name: String },

    #[error("Invalid index")]
    InvalidIndex { index: i64, len: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for robot operations.
pub type RobotResult<T> = Result<T, RobotError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_messages() {
        assert_eq!(RobotError::MissingFields.to_string(), "Missing fields");
        assert_eq!(
            RobotError::InvalidFileFormat {
                file_name: "notes.txt".to_string()
            }
            .to_string(),
            "Invalid file format"
        );
        assert_eq!(
            RobotError::InvalidIndex { index: -1, len: 3 }.to_string(),
            "Invalid index"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: RobotError = StorageError::LockPoisoned.into();
        assert!(matches!(err, RobotError::Storage(StorageError::LockPoisoned)));
        assert!(err.to_string().contains("lock poisoned"));
    }
}
