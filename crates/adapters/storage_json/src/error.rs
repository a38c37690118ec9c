//! Storage-specific error type wrapping file and JSON errors.

use std::path::PathBuf;

use staple_domain::error::StapleError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing, or renaming the data file failed.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not a valid request collection.
    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for StapleError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
