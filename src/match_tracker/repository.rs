use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::errors::MatchTrackerError;
use super::models::{MatchResult, Matches};
use crate::core::user::Guild;
use crate::storage::{read_or_init, StorageBackend};

/// Persistence of a guild's match history.
///
/// Writes are whole-history read-modify-write cycles with no locking, so two
/// concurrent writers for one guild race and the last write wins.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn all_matches(&self, guild: &Guild) -> Result<Matches, MatchTrackerError>;

    async fn store_match_result(
        &self,
        guild: &Guild,
        result: MatchResult,
    ) -> Result<(), MatchTrackerError>;

    /// Fails with `ResultNotFound` if no stored match has the same `result_id`
    async fn replace_match_result(
        &self,
        guild: &Guild,
        result: MatchResult,
    ) -> Result<(), MatchTrackerError>;
}

/// Keeps each guild's history as a JSON array at `<root>/<guild_id>/<file_name>`
pub struct StoredMatchRepository {
    backend: Arc<dyn StorageBackend>,
    root: String,
    file_name: String,
}

impl StoredMatchRepository {
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

    async fn save(&self, guild: &Guild, matches: &Matches) -> Result<(), MatchTrackerError> {
        let contents = serde_json::to_string(matches)?;
        self.backend
            .store_file(&self.root, &self.object_name(guild), &contents)
            .await?;
        debug!(guild_id = %guild.guild_id, matches = matches.len(), "Saved match history");
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for StoredMatchRepository {
    #[instrument(skip(self), fields(guild_id = %guild.guild_id))]
    async fn all_matches(&self, guild: &Guild) -> Result<Matches, MatchTrackerError> {
        let contents =
            read_or_init(self.backend.as_ref(), &self.root, &self.object_name(guild), "[]").await?;
        let matches: Matches = serde_json::from_str(&contents)?;
        debug!(matches = matches.len(), "Loaded match history");
        Ok(matches)
    }

    #[instrument(skip(self, result), fields(guild_id = %guild.guild_id, result_id = %result.result_id))]
    async fn store_match_result(
        &self,
        guild: &Guild,
        result: MatchResult,
    ) -> Result<(), MatchTrackerError> {
        info!(match_result = %result, "Recording match");
        let matches = self.all_matches(guild).await?.add(result);
        self.save(guild, &matches).await
    }

    #[instrument(skip(self, result), fields(guild_id = %guild.guild_id, result_id = %result.result_id))]
    async fn replace_match_result(
        &self,
        guild: &Guild,
        result: MatchResult,
    ) -> Result<(), MatchTrackerError> {
        info!(match_result = %result, "Replacing match");
        let matches = self.all_matches(guild).await?.replace(result)?;
        self.save(guild, &matches).await
    }
}
