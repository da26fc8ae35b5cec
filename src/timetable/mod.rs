pub mod client;
pub mod commands;
pub mod models;

pub use client::LeisureCentreTimetable;
pub use models::{filter_by_hours, filter_sessions, DayType, TimeOfDay, TimetableSession};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::core::command::CommandError;

#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("Timetable request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Timetable returned status {0}")]
    Status(u16),
}

impl From<TimetableError> for CommandError {
    fn from(err: TimetableError) -> Self {
        CommandError::Failed(err.to_string())
    }
}

/// Source of bookable court sessions
#[async_trait]
pub trait Timetable: Send + Sync {
    async fn get_sessions(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<TimetableSession>, TimetableError>;
}

/// A fixed list of sessions, clipped to the requested window
#[derive(Debug, Clone, Default)]
pub struct StaticTimetable {
    sessions: Vec<TimetableSession>,
}

impl StaticTimetable {
    pub fn new(sessions: Vec<TimetableSession>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl Timetable for StaticTimetable {
    async fn get_sessions(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<TimetableSession>, TimetableError> {
        Ok(self
            .sessions
            .iter()
            .filter(|session| session.start_datetime >= from && session.start_datetime <= to)
            .cloned()
            .collect())
    }
}
