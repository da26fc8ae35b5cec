use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::user::User;

/// A booked court session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub start_datetime: NaiveDateTime,
    pub booked_by: User,
    pub session_id: Uuid,
}

impl Session {
    pub fn new(start_datetime: NaiveDateTime, booked_by: &User) -> Self {
        Self {
            start_datetime,
            booked_by: booked_by.clone(),
            session_id: Uuid::new_v4(),
        }
    }
}

/// A guild's bookings in storage order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sessions {
    sessions: Vec<Session>,
}

impl Sessions {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    pub fn add(&self, session: Session) -> Self {
        let mut sessions = self.sessions.clone();
        sessions.push(session);
        Self { sessions }
    }

    pub fn remove(&self, session: &Session) -> Self {
        Self {
            sessions: self
                .sessions
                .iter()
                .filter(|existing| existing.session_id != session.session_id)
                .cloned()
                .collect(),
        }
    }

    pub fn for_date(&self, date: NaiveDate) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|session| session.start_datetime.date() == date)
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn add_remove_and_query_by_date() {
        let booker = User::new("1", "booker", None);
        let monday = Session::new(at(1, 18), &booker);
        let also_monday = Session::new(at(1, 19), &booker);
        let tuesday = Session::new(at(2, 18), &booker);

        let sessions = Sessions::default()
            .add(monday.clone())
            .add(also_monday.clone())
            .add(tuesday.clone());
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions.for_date(at(1, 0).date()), vec![&monday, &also_monday]);

        let sessions = sessions.remove(&monday);
        assert_eq!(sessions.for_date(at(1, 0).date()), vec![&also_monday]);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn decodes_stored_sessions() {
        let stored = json!([{
            "start_datetime": "2024-01-01T18:00:00",
            "booked_by": {"id": "1", "username": "booker", "global_name": null},
            "session_id": "0f8fad5b-d9cb-469f-a165-70867728950e"
        }]);

        let sessions: Sessions = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(sessions.iter().next().unwrap().start_datetime, at(1, 18));
        assert_eq!(serde_json::to_value(&sessions).unwrap(), stored);
    }
}
