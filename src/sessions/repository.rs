use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::models::{Session, Sessions};
use super::SessionError;
use crate::core::user::Guild;
use crate::storage::{read_or_init, StorageBackend};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn all_sessions(&self, guild: &Guild) -> Result<Sessions, SessionError>;

    async fn store_session(&self, guild: &Guild, session: Session) -> Result<(), SessionError>;
}

/// Keeps each guild's bookings as a JSON array at `<root>/<guild_id>/<file_name>`
pub struct StoredSessionRepository {
    backend: Arc<dyn StorageBackend>,
    root: String,
    file_name: String,
}

impl StoredSessionRepository {
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        root: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    fn object_name(&self, guild: &Guild) -> String {
        format!("{}/{}", guild.guild_id, self.file_name)
    }
}

#[async_trait]
impl SessionRepository for StoredSessionRepository {
    #[instrument(skip(self), fields(guild_id = %guild.guild_id))]
    async fn all_sessions(&self, guild: &Guild) -> Result<Sessions, SessionError> {
        let contents =
            read_or_init(self.backend.as_ref(), &self.root, &self.object_name(guild), "[]").await?;
        let sessions: Sessions = serde_json::from_str(&contents)?;
        debug!(sessions = sessions.len(), "Loaded sessions");
        Ok(sessions)
    }

    #[instrument(skip(self, session), fields(guild_id = %guild.guild_id, session_id = %session.session_id))]
    async fn store_session(&self, guild: &Guild, session: Session) -> Result<(), SessionError> {
        info!(start = %session.start_datetime, booked_by = %session.booked_by.id, "Storing session");
        let sessions = self.all_sessions(guild).await?.add(session);
        let contents = serde_json::to_string(&sessions)?;
        self.backend
            .store_file(&self.root, &self.object_name(guild), &contents)
            .await?;
        Ok(())
    }
}
