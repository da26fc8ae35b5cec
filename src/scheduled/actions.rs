use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use tracing::{info, instrument};

use super::{Action, ActionError};
use crate::notify::Notifier;
use crate::timetable::{filter_by_hours, DayType, Timetable, TimetableSession};

const PROMPT_HOURS: [u32; 2] = [18, 19];
const LOOKAHEAD_DAYS: i64 = 7;
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Asks the configured channels whether anyone wants to book a court this week
pub struct PromptSessionBooking {
    timetable: Arc<dyn Timetable>,
    notifier: Arc<dyn Notifier>,
    channel_ids: Vec<String>,
}

impl PromptSessionBooking {
    pub const CODE: &'static str = "prompt-session-booking";

    pub fn new(
        timetable: Arc<dyn Timetable>,
        notifier: Arc<dyn Notifier>,
        channel_ids: Vec<String>,
    ) -> Self {
        Self {
            timetable,
            notifier,
            channel_ids,
        }
    }

    async fn upcoming_sessions(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<TimetableSession>, ActionError> {
        let sessions = self
            .timetable
            .get_sessions(now, now + Duration::days(LOOKAHEAD_DAYS))
            .await?;
        info!(sessions = sessions.len(), "Got sessions from timetable");
        Ok(filter_by_hours(&sessions, &PROMPT_HOURS, DayType::Weekday))
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// "A", "A and B", "A, B and C"
fn join_names(names: &[&str]) -> String {
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

pub fn prompt_message(sessions: &[TimetableSession]) -> String {
    let base = "Are we playing squash this week?";

    let (free, booked): (Vec<Weekday>, Vec<Weekday>) = WEEK.iter().copied().partition(|day| {
        sessions
            .iter()
            .any(|session| session.start_datetime.weekday() == *day)
    });
    let free: Vec<&str> = free.into_iter().map(weekday_name).collect();
    let booked: Vec<&str> = booked.into_iter().map(weekday_name).collect();

    if free.is_empty() {
        format!("{base} All 6pm sessions are already booked this week 💀")
    } else if booked.len() <= 2 {
        format!("{base} 6pm is free every day other than {}", booked.join(" and "))
    } else {
        format!("{base} 6pm is free on {}", join_names(&free))
    }
}

#[async_trait]
impl Action for PromptSessionBooking {
    fn code(&self) -> &'static str {
        Self::CODE
    }

    #[instrument(skip(self), fields(channels = self.channel_ids.len()))]
    async fn run(&self, now: NaiveDateTime) -> Result<(), ActionError> {
        let sessions = self.upcoming_sessions(now).await?;
        let message = prompt_message(&sessions);

        for channel_id in &self.channel_ids {
            info!(channel_id = %channel_id, "Prompting channel to book a session");
            self.notifier.send(channel_id, &message).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::timetable::StaticTimetable;
    use chrono::NaiveDate;

    // 2024-01-01 is a Monday
    fn session(day: u32, hour: u32, available_slots: i64) -> TimetableSession {
        let start = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        TimetableSession::new(start, available_slots, i64::from(day))
    }

    #[test]
    fn message_when_everything_is_booked() {
        assert_eq!(
            prompt_message(&[]),
            "Are we playing squash this week? All 6pm sessions are already booked this week 💀"
        );
    }

    #[test]
    fn message_lists_free_days_in_week_order() {
        let sessions = vec![session(3, 18, 1), session(1, 19, 1), session(3, 19, 1)];
        assert_eq!(
            prompt_message(&sessions),
            "Are we playing squash this week? 6pm is free on Monday and Wednesday"
        );
        assert_eq!(
            prompt_message(&[session(2, 18, 1)]),
            "Are we playing squash this week? 6pm is free on Tuesday"
        );
    }

    #[test]
    fn message_names_the_missing_days_when_most_are_free() {
        let sessions: Vec<_> = (1..=5).map(|day| session(day, 18, 1)).collect();
        assert_eq!(
            prompt_message(&sessions),
            "Are we playing squash this week? 6pm is free every day other than Saturday and Sunday"
        );
    }

    #[tokio::test]
    async fn sends_prompt_to_every_channel() {
        let timetable = StaticTimetable::new(vec![
            session(1, 18, 1),
            session(2, 20, 1),
            session(3, 19, 0),
            session(4, 19, 2),
            session(6, 18, 2),
            session(9, 18, 2),
        ]);
        let notifier = Arc::new(RecordingNotifier::new());
        let action = PromptSessionBooking::new(
            Arc::new(timetable),
            notifier.clone(),
            vec!["100".to_string(), "200".to_string()],
        );

        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        action.run(now).await.unwrap();

        let expected = "Are we playing squash this week? 6pm is free on Monday and Thursday";
        assert_eq!(
            notifier.sent().await,
            vec![
                ("100".to_string(), expected.to_string()),
                ("200".to_string(), expected.to_string())
            ]
        );
    }
}
