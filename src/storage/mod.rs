pub mod local;
pub mod memory;

pub use local::LocalStorage;
pub use memory::InMemoryStorage;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {path}/{name}")]
    FileMissing { path: String, name: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid object name: {0:?}")]
    InvalidName(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Flat object storage: a root `path` (directory or bucket) holding named objects
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn store_file(&self, path: &str, name: &str, contents: &str) -> Result<(), StorageError>;

    /// Fails with [`StorageError::FileMissing`] when the object does not exist
    async fn read_file(&self, path: &str, name: &str) -> Result<String, StorageError>;
}

/// Reads an object, creating it with `initial` contents on first access
pub async fn read_or_init(
    backend: &dyn StorageBackend,
    path: &str,
    name: &str,
    initial: &str,
) -> Result<String, StorageError> {
    match backend.read_file(path, name).await {
        Ok(contents) => Ok(contents),
        Err(StorageError::FileMissing { .. }) => {
            info!(path, name, "File not found, creating");
            backend.store_file(path, name, initial).await?;
            Ok(initial.to_string())
        }
        Err(err) => Err(err),
    }
}
