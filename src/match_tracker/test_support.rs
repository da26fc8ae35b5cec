use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::models::{MatchResult, Matches};
use crate::core::user::User;

pub fn user(id: &str) -> User {
    User::new(id, format!("user-{id}"), Some(id))
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid test datetime")
}

/// A result where the winner served and logged the match
pub fn match_result(
    winner: &User,
    winner_score: i32,
    loser: &User,
    loser_score: i32,
    played_at: NaiveDateTime,
) -> MatchResult {
    MatchResult {
        winner: winner.clone(),
        winner_score,
        loser_score,
        loser: loser.clone(),
        served: winner.clone(),
        played_at,
        logged_at: played_at,
        logged_by: winner.clone(),
        result_id: Uuid::new_v4(),
    }
}

/// Matches one hour apart starting at `start`, each given as (winner, loser)
pub fn history(start: NaiveDateTime, results: &[(&User, &User)]) -> Matches {
    Matches::new(
        results
            .iter()
            .enumerate()
            .map(|(index, (winner, loser))| {
                match_result(
                    winner,
                    11,
                    loser,
                    5,
                    start + chrono::Duration::hours(index as i64),
                )
            })
            .collect(),
    )
}
