use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while deriving a short code from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("cannot generate a short code for an empty url")]
    EmptyInput,
}

/// Errors raised by the mapping store and its persistence layer.
///
/// Lookup misses are not errors; they surface as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write table to {}: {source}", path.display())]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read table from {}: {source}", path.display())]
    PersistenceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("table file {} is corrupted at line {line}: {reason}", path.display())]
    Corrupted {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("storage task failed: {0}")]
    Task(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<GenerateError> for ShortenerError {
    fn from(value: GenerateError) -> Self {
        match value {
            GenerateError::EmptyInput => Self::EmptyUrl,
        }
    }
}
