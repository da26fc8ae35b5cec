use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use strum_macros::{Display, EnumIter, EnumString};

pub const SESSION_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSession {
    pub start_datetime: NaiveDateTime,
    pub available_slots: i64,
    pub schedule_id: i64,
}

impl TimetableSession {
    pub fn new(start_datetime: NaiveDateTime, available_slots: i64, schedule_id: i64) -> Self {
        Self {
            start_datetime,
            available_slots,
            schedule_id,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available_slots > 0
    }
}

impl std::fmt::Display for TimetableSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start_datetime.format(SESSION_TIME_FORMAT))
    }
}

/// Named windows of start hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    PostWorkSesh,
    PostWorkSeshPlus,
    All,
}

impl TimeOfDay {
    pub fn contains_hour(&self, hour: u32) -> bool {
        match self {
            TimeOfDay::Morning => hour < 12,
            TimeOfDay::Afternoon => (12..17).contains(&hour),
            TimeOfDay::Evening => (17..24).contains(&hour),
            TimeOfDay::PostWorkSesh => hour == 19,
            TimeOfDay::PostWorkSeshPlus => (18..21).contains(&hour),
            TimeOfDay::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Weekday,
    Weekend,
    All,
}

impl DayType {
    pub fn contains(&self, weekday: Weekday) -> bool {
        let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        match self {
            DayType::Weekday => !weekend,
            DayType::Weekend => weekend,
            DayType::All => true,
        }
    }
}

pub fn filter_sessions(
    sessions: &[TimetableSession],
    time_of_day: TimeOfDay,
    show_unavailable_slots: bool,
) -> Vec<TimetableSession> {
    sessions
        .iter()
        .filter(|session| show_unavailable_slots || session.is_available())
        .filter(|session| time_of_day.contains_hour(session.start_datetime.hour()))
        .cloned()
        .collect()
}

/// Available sessions starting on one of `hours` on the given kind of day
pub fn filter_by_hours(
    sessions: &[TimetableSession],
    hours: &[u32],
    days: DayType,
) -> Vec<TimetableSession> {
    sessions
        .iter()
        .filter(|session| session.is_available())
        .filter(|session| hours.contains(&session.start_datetime.hour()))
        .filter(|session| days.contains(session.start_datetime.weekday()))
        .cloned()
        .collect()
}
