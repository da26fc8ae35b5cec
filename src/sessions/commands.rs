use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::models::Session;
use super::repository::SessionRepository;
use super::when::{parse_when, to_local};
use crate::core::command::{
    Command, CommandContext, CommandError, CommandOption, CommandOptionType,
};
use crate::core::response::ResponseBody;

pub const WHEN: &str = "when";

pub struct BookSessionCommand {
    repository: Arc<dyn SessionRepository>,
    options: Vec<CommandOption>,
}

impl BookSessionCommand {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            options: vec![CommandOption::new(
                WHEN,
                "When is the session? e.g. Monday at 6pm",
                CommandOptionType::String,
            )
            .required()],
        }
    }
}

#[async_trait]
impl Command for BookSessionCommand {
    fn name(&self) -> &'static str {
        "book-session"
    }

    fn description(&self) -> &'static str {
        "Record the time and date of a booked session"
    }

    fn options(&self) -> &[CommandOption] {
        &self.options
    }

    async fn run(&self, context: CommandContext) -> Result<ResponseBody, CommandError> {
        let when = context.options.require_string(WHEN)?;
        info!(when, "Booking session");

        let Some(start) = parse_when(when, context.now) else {
            return Ok(ResponseBody::ephemeral(
                "Could not parse date, please reword and try again",
            ));
        };
        if start < context.now {
            return Ok(ResponseBody::ephemeral(
                "Parsed date is in the past, please reword and try again",
            ));
        }

        info!(start = %start, "Parsed session start");
        let session = Session::new(start, &context.user);
        self.repository
            .store_session(&context.guild, session)
            .await?;

        Ok(ResponseBody::channel_message(format!(
            "Booked @ {}",
            to_local(start).format("%A %-I%p")
        )))
    }
}
