use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{StorageBackend, StorageError};

/// Stores objects as files under `<path>/<name>`
#[derive(Debug, Default, Clone)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    /// Names must stay below `path`: relative, non-empty and free of `..`
    fn full_path(path: &str, name: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(name);
        let stays_inside = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || !stays_inside {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(PathBuf::from(path).join(relative))
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    #[instrument(skip(self, contents))]
    async fn store_file(&self, path: &str, name: &str, contents: &str) -> Result<(), StorageError> {
        let full_path = Self::full_path(path, name)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, contents).await?;
        debug!(path = %full_path.display(), bytes = contents.len(), "Stored file");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn read_file(&self, path: &str, name: &str) -> Result<String, StorageError> {
        let full_path = Self::full_path(path, name)?;
        match tokio::fs::read_to_string(&full_path).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileMissing {
                path: path.to_string(),
                name: name.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}
