use thiserror::Error;
use uuid::Uuid;

use super::validate::ValidationError;
use crate::core::command::CommandError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum MatchTrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Field {0} does not exist")]
    FieldDoesNotExist(String),

    #[error("No matches have been recorded.")]
    EmptyHistory,

    #[error("No match found with id {0}")]
    ResultNotFound(Uuid),

    #[error("Invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Pick two different players to compare")]
    SamePlayers,

    #[error("Missing option {0}")]
    MissingOption(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Could not decode match history: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<MatchTrackerError> for CommandError {
    fn from(err: MatchTrackerError) -> Self {
        match err {
            MatchTrackerError::MissingOption(name) => {
                CommandError::MissingOptions(vec![name.to_string()])
            }
            MatchTrackerError::Storage(err) => CommandError::Storage(err),
            MatchTrackerError::Decode(err) => CommandError::Failed(err.to_string()),
            rejected => CommandError::Rejected(rejected.to_string()),
        }
    }
}
