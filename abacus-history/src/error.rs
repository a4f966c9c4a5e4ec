//! Storage errors for history persistence

use abacus_core::AbacusError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed history file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StorageError {
    pub fn path(&self) -> &PathBuf {
        match self {
            StorageError::Io { path, .. } | StorageError::Csv { path, .. } => path,
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for AbacusError {
    fn from(err: StorageError) -> Self {
        AbacusError::storage(err.to_string())
    }
}
