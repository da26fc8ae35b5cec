pub mod commands;
pub mod models;
pub mod repository;
pub mod when;

pub use models::{Session, Sessions};
pub use repository::{SessionRepository, StoredSessionRepository};

use thiserror::Error;

use crate::core::command::CommandError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Could not decode sessions: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<SessionError> for CommandError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Storage(err) => CommandError::Storage(err),
            SessionError::Decode(err) => CommandError::Failed(err.to_string()),
        }
    }
}
