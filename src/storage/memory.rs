use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{StorageBackend, StorageError};

/// In-memory object storage for development and testing.
///
/// Data is lost when the process exits.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    files: Arc<RwLock<HashMap<(String, String), String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[cfg(test)]
impl InMemoryStorage {
    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    async fn store_file(&self, path: &str, name: &str, contents: &str) -> Result<(), StorageError> {
        debug!(path, name, bytes = contents.len(), "Storing file in memory");
        self.files
            .write()
            .await
            .insert((path.to_string(), name.to_string()), contents.to_string());
        Ok(())
    }

    async fn read_file(&self, path: &str, name: &str) -> Result<String, StorageError> {
        self.files
            .read()
            .await
            .get(&(path.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::FileMissing {
                path: path.to_string(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn overwrites_whole_file() {
        let storage = InMemoryStorage::new();
        storage.store_file("root", "a", "first").await.unwrap();
        storage.store_file("root", "a", "second").await.unwrap();

        assert_eq!(storage.read_file("root", "a").await.unwrap(), "second");
        assert_eq!(storage.file_count().await, 1);
    }

    #[tokio::test]
    async fn partitions_by_path() {
        let storage = InMemoryStorage::new();
        storage.store_file("root", "a", "contents").await.unwrap();

        assert!(matches!(
            storage.read_file("other-root", "a").await,
            Err(StorageError::FileMissing { .. })
        ));
    }
}
