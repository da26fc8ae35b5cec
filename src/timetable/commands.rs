use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use strum::IntoEnumIterator;
use tracing::info;

use super::models::{filter_sessions, TimeOfDay, TimetableSession};
use super::Timetable;
use crate::core::command::{
    Command, CommandContext, CommandError, CommandOption, CommandOptionChoice, CommandOptionType,
    OptionValue,
};
use crate::core::response::ResponseBody;

pub const DAYS: &str = "days";
pub const TIME_OF_DAY: &str = "time-of-day";

const DEFAULT_DAYS: i64 = 7;
const SHORT_DATE_FORMAT: &str = "%d-%m";

pub struct ListTimetableCommand {
    timetable: Arc<dyn Timetable>,
    options: Vec<CommandOption>,
}

impl ListTimetableCommand {
    pub fn new(timetable: Arc<dyn Timetable>) -> Self {
        let choices = TimeOfDay::iter()
            .map(|time_of_day| {
                CommandOptionChoice::new(
                    time_of_day.to_string(),
                    OptionValue::String(time_of_day.to_string()),
                )
            })
            .collect();

        Self {
            timetable,
            options: vec![
                CommandOption::new(
                    DAYS,
                    "The amount of days to check for squash sessions. Default=7",
                    CommandOptionType::Integer,
                )
                .with_default(OptionValue::Integer(DEFAULT_DAYS)),
                CommandOption::new(
                    TIME_OF_DAY,
                    "The time of day to filter squash sessions by. Default=PostWorkSesh",
                    CommandOptionType::String,
                )
                .with_default(OptionValue::String(TimeOfDay::PostWorkSesh.to_string()))
                .with_choices(choices),
            ],
        }
    }
}

/// Sessions grouped by day, one `<Weekday> (dd-mm):` block per date
fn format_sessions(sessions: &[TimetableSession]) -> String {
    let mut days: Vec<(String, Vec<String>)> = Vec::new();
    for session in sessions {
        let heading = session.start_datetime.format("%A (%d-%m)").to_string();
        if days.last().map(|(last, _)| last != &heading).unwrap_or(true) {
            days.push((heading, Vec::new()));
        }
        if let Some((_, times)) = days.last_mut() {
            times.push(session.to_string());
        }
    }

    days.iter()
        .map(|(heading, times)| format!("{heading}:\n\t{}", times.join(", ")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn no_sessions_message(days: i64, from: NaiveDateTime, to: NaiveDateTime) -> String {
    let from = from.format(SHORT_DATE_FORMAT);
    if days == 1 {
        format!("No available sessions on {from}")
    } else {
        format!(
            "No available sessions between {from} and {}",
            to.format(SHORT_DATE_FORMAT)
        )
    }
}

#[async_trait]
impl Command for ListTimetableCommand {
    fn name(&self) -> &'static str {
        "list-timetable"
    }

    fn description(&self) -> &'static str {
        "Get a list of squash timetable sessions for the coming days"
    }

    fn options(&self) -> &[CommandOption] {
        &self.options
    }

    async fn run(&self, context: CommandContext) -> Result<ResponseBody, CommandError> {
        let days = context.options.integer(DAYS).unwrap_or(DEFAULT_DAYS);
        if days < 1 {
            return Err(CommandError::Rejected(format!(
                "Don't be daft now.. {days} must be > 0"
            )));
        }

        let time_of_day = match context.options.string(TIME_OF_DAY) {
            Some(name) => TimeOfDay::from_str(name)
                .map_err(|_| CommandError::Rejected("Invalid time of day".to_string()))?,
            None => TimeOfDay::PostWorkSesh,
        };

        let from = context.now;
        let to = Duration::try_days(days)
            .and_then(|window| from.checked_add_signed(window))
            .ok_or_else(|| CommandError::Rejected(format!("Don't be daft now.. {days} days is too far ahead")))?;

        info!(days, %time_of_day, "Listing timetable");
        let sessions = self.timetable.get_sessions(from, to).await?;
        let available = filter_sessions(&sessions, time_of_day, false);

        if available.is_empty() {
            return Ok(ResponseBody::channel_message(no_sessions_message(
                days, from, to,
            )));
        }
        Ok(ResponseBody::channel_message(format_sessions(&available)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::CommandOptions;
    use crate::core::user::{Guild, User};
    use crate::timetable::StaticTimetable;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn command() -> ListTimetableCommand {
        ListTimetableCommand::new(Arc::new(StaticTimetable::new(vec![
            TimetableSession::new(at(1, 19), 1, 1),
            TimetableSession::new(at(1, 18), 1, 2),
            TimetableSession::new(at(2, 19), 0, 3),
            TimetableSession::new(at(3, 19), 2, 4),
            TimetableSession::new(at(3, 20), 2, 5),
            TimetableSession::new(at(12, 19), 2, 6),
        ])))
    }

    fn context(options: CommandOptions) -> CommandContext {
        CommandContext {
            options,
            guild: Guild::new("guild-1"),
            user: User::new("1", "user", None),
            now: at(1, 8),
        }
    }

    #[tokio::test]
    async fn lists_post_work_sessions_by_default() {
        let response = command().run(context(CommandOptions::new())).await.unwrap();
        assert_eq!(
            response.content(),
            Some("Monday (01-01):\n\t19:00\n\nWednesday (03-01):\n\t19:00")
        );
    }

    #[tokio::test]
    async fn groups_several_times_per_day() {
        let options = CommandOptions::new()
            .with(DAYS, OptionValue::Integer(3))
            .with(TIME_OF_DAY, OptionValue::String("PostWorkSeshPlus".to_string()));
        let response = command().run(context(options)).await.unwrap();
        assert_eq!(
            response.content(),
            Some("Monday (01-01):\n\t19:00, 18:00\n\nWednesday (03-01):\n\t19:00, 20:00")
        );
    }

    #[tokio::test]
    async fn reports_empty_windows() {
        let one_day = CommandOptions::new()
            .with(DAYS, OptionValue::Integer(1))
            .with(TIME_OF_DAY, OptionValue::String("Morning".to_string()));
        let response = command().run(context(one_day)).await.unwrap();
        assert_eq!(response.content(), Some("No available sessions on 01-01"));

        let week = CommandOptions::new()
            .with(TIME_OF_DAY, OptionValue::String("Afternoon".to_string()));
        let response = command().run(context(week)).await.unwrap();
        assert_eq!(
            response.content(),
            Some("No available sessions between 01-01 and 08-01")
        );
    }

    #[tokio::test]
    async fn rejects_non_positive_days() {
        let options = CommandOptions::new().with(DAYS, OptionValue::Integer(0));
        let err = command().run(context(options)).await.unwrap_err();
        assert!(err.is_user_facing());
        assert_eq!(err.to_string(), "Don't be daft now.. 0 must be > 0");
    }

    #[tokio::test]
    async fn rejects_unknown_time_of_day() {
        let options =
            CommandOptions::new().with(TIME_OF_DAY, OptionValue::String("Midnight".to_string()));
        let err = command().run(context(options)).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid time of day");
    }
}
