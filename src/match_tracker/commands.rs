use std::sync::Arc;

use async_trait::async_trait;
use strum::IntoEnumIterator;
use tracing::info;
use uuid::Uuid;

use super::errors::MatchTrackerError;
use super::filterers::{Filterer, RECENT_MATCH_COUNT};
use super::formatters::Formatter;
use super::models::{MatchField, MatchResult};
use super::option_names::*;
use super::orderers::Orderer;
use super::pipeline::QueryPipeline;
use super::repository::MatchRepository;
use super::validate::validate_match_result;
use crate::core::command::{
    Command, CommandContext, CommandError, CommandOption, CommandOptionChoice, CommandOptionType,
    CommandOptions, OptionValue,
};
use crate::core::response::ResponseBody;
use crate::core::user::User;

pub const NO_MATCHES: &str = "No matches have been recorded.";

fn score_options() -> Vec<CommandOption> {
    vec![
        CommandOption::new(PLAYER_ONE, "Player one, assumed to have served", CommandOptionType::User)
            .required(),
        CommandOption::new(PLAYER_ONE_SCORE, "Player one's score", CommandOptionType::Integer)
            .required(),
        CommandOption::new(PLAYER_TWO, "Player two", CommandOptionType::User).required(),
        CommandOption::new(PLAYER_TWO_SCORE, "Player two's score", CommandOptionType::Integer)
            .required(),
    ]
}

fn score(value: i64) -> Result<i32, CommandError> {
    i32::try_from(value).map_err(|_| CommandError::Rejected(format!("Score {value} is out of range")))
}

/// Builds a validated result from the four score options
fn scored_result(context: &CommandContext) -> Result<MatchResult, CommandError> {
    let options = &context.options;
    let player_one: &User = options.require_user(PLAYER_ONE)?;
    let player_two: &User = options.require_user(PLAYER_TWO)?;
    let player_one_score = score(options.require_integer(PLAYER_ONE_SCORE)?)?;
    let player_two_score = score(options.require_integer(PLAYER_TWO_SCORE)?)?;

    let result = MatchResult::from_scores(
        (player_one, player_one_score),
        (player_two, player_two_score),
        &context.user,
        context.now,
    );
    validate_match_result(&result).map_err(MatchTrackerError::from)?;
    Ok(result)
}

pub struct RecordMatchCommand {
    repository: Arc<dyn MatchRepository>,
    options: Vec<CommandOption>,
}

impl RecordMatchCommand {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            repository,
            options: score_options(),
        }
    }
}

#[async_trait]
impl Command for RecordMatchCommand {
    fn name(&self) -> &'static str {
        "record-match"
    }

    fn description(&self) -> &'static str {
        "Record a match between two players. The first player is assumed to have served."
    }

    fn options(&self) -> &[CommandOption] {
        &self.options
    }

    async fn run(&self, context: CommandContext) -> Result<ResponseBody, CommandError> {
        let result = scored_result(&context)?;
        let summary = result.summary();

        self.repository
            .store_match_result(&context.guild, result)
            .await?;

        Ok(ResponseBody::channel_message(format!(
            "Match recorded: {summary}"
        )))
    }
}

/// Replaces a stored result, keeping its id and the time it was played
pub struct EditMatchCommand {
    repository: Arc<dyn MatchRepository>,
    options: Vec<CommandOption>,
}

impl EditMatchCommand {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        let mut options = vec![CommandOption::new(
            MATCH_ID,
            "Id of the match to edit, see show-matches with show-ids",
            CommandOptionType::String,
        )
        .required()];
        options.extend(score_options());
        Self {
            repository,
            options,
        }
    }
}

#[async_trait]
impl Command for EditMatchCommand {
    fn name(&self) -> &'static str {
        "edit-match"
    }

    fn description(&self) -> &'static str {
        "Correct the players or scores of a recorded match."
    }

    fn options(&self) -> &[CommandOption] {
        &self.options
    }

    async fn run(&self, context: CommandContext) -> Result<ResponseBody, CommandError> {
        let match_id = context.options.require_string(MATCH_ID)?;
        let result_id = Uuid::parse_str(match_id)
            .map_err(|_| CommandError::Rejected(format!("Invalid match id {match_id}")))?;

        let history = self.repository.all_matches(&context.guild).await?;
        let original = history
            .find(result_id)
            .ok_or(MatchTrackerError::ResultNotFound(result_id))?;

        let result = scored_result(&context)?.replacing(original);
        let summary = result.summary();
        info!(%result_id, edited_by = %context.user.id, "Editing match");

        self.repository
            .replace_match_result(&context.guild, result)
            .await?;

        Ok(ResponseBody::channel_message(format!(
            "Match updated: {summary}"
        )))
    }
}

/// A read-only command that runs the stored history through a [`QueryPipeline`]
pub struct MatchQueryCommand {
    name: &'static str,
    description: &'static str,
    options: Vec<CommandOption>,
    /// Chooses the pipeline for a request, rejecting option combinations it cannot answer
    pipeline: fn(&CommandOptions) -> Result<QueryPipeline, MatchTrackerError>,
    repository: Arc<dyn MatchRepository>,
}

impl MatchQueryCommand {
    pub fn show_matches(repository: Arc<dyn MatchRepository>) -> Self {
        let fields = MatchField::iter()
            .map(|field| CommandOptionChoice::new(field.to_string(), OptionValue::String(field.to_string())))
            .collect();

        Self {
            name: "show-matches",
            description: "Show the most recently recorded matches.",
            options: vec![
                CommandOption::new(SORT_BY, "The field to sort the matches by", CommandOptionType::String)
                    .with_default(OptionValue::String(MatchField::PlayedAt.to_string()))
                    .with_choices(fields),
                CommandOption::new(SHOW_IDS, "Include match ids", CommandOptionType::Boolean),
                CommandOption::new(COMPACT, "One line per match", CommandOptionType::Boolean),
            ],
            pipeline: |options| {
                let formatter = if options.boolean(COMPACT).unwrap_or(false) {
                    Formatter::Basic
                } else {
                    Formatter::PlayedAt {
                        show_ids: options.boolean(SHOW_IDS).unwrap_or(false),
                    }
                };
                Ok(QueryPipeline::new(
                    Filterer::LastN(RECENT_MATCH_COUNT),
                    Orderer::SortByOption,
                    formatter,
                ))
            },
            repository,
        }
    }

    pub fn league_table(repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            name: "league-table",
            description: "Show wins and losses for every player.",
            options: vec![CommandOption::new(
                FROM_DATE,
                "Only count matches from this date (YYYY-MM-DD)",
                CommandOptionType::String,
            )],
            pipeline: |_| {
                Ok(QueryPipeline::new(Filterer::FromDate, Orderer::Noop, Formatter::LeagueTable))
            },
            repository,
        }
    }

    pub fn head_to_head(repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            name: "head-to-head",
            description: "Compare two players' record against each other.",
            options: vec![
                CommandOption::new(PLAYER_ONE, "Player one", CommandOptionType::User).required(),
                CommandOption::new(PLAYER_TWO, "Player two", CommandOptionType::User).required(),
            ],
            pipeline: |options| {
                if let (Some(one), Some(two)) = (options.user(PLAYER_ONE), options.user(PLAYER_TWO)) {
                    if one == two {
                        return Err(MatchTrackerError::SamePlayers);
                    }
                }
                Ok(QueryPipeline::new(
                    Filterer::HeadToHead,
                    Orderer::PlayedAt,
                    Formatter::HeadToHead,
                ))
            },
            repository,
        }
    }

    pub fn session_summary(repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            name: "session-summary",
            description: "Summarise a session's results and badges.",
            options: vec![CommandOption::new(
                DATE,
                "Session date (YYYY-MM-DD), defaults to the most recent session",
                CommandOptionType::String,
            )],
            pipeline: |_| {
                Ok(QueryPipeline::new(
                    Filterer::Noop,
                    Orderer::PlayedAt,
                    Formatter::SessionSummary,
                ))
            },
            repository,
        }
    }
}

#[async_trait]
impl Command for MatchQueryCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn options(&self) -> &[CommandOption] {
        &self.options
    }

    async fn run(&self, context: CommandContext) -> Result<ResponseBody, CommandError> {
        let pipeline = (self.pipeline)(&context.options)?;
        let matches = self.repository.all_matches(&context.guild).await?;
        if matches.is_empty() {
            return Ok(ResponseBody::channel_message(NO_MATCHES));
        }

        let content = pipeline.run(&matches, &context.options, context.now)?;
        Ok(ResponseBody::channel_message(content))
    }
}
