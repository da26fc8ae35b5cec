use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

use super::errors::MatchTrackerError;
use crate::core::user::User;

/// A single recorded squash game.
///
/// Scores are not constrained by the type; rule checks live in
/// [`validate_match_result`](super::validate::validate_match_result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: User,
    pub winner_score: i32,
    pub loser_score: i32,
    pub loser: User,
    pub served: User,
    pub played_at: NaiveDateTime,
    pub logged_at: NaiveDateTime,
    pub logged_by: User,
    pub result_id: Uuid,
}

impl MatchResult {
    /// Builds a fresh result from two (player, score) pairs.
    ///
    /// The first player is taken to have served. `played_at` and `logged_at`
    /// are both `now`.
    pub fn from_scores(
        first: (&User, i32),
        second: (&User, i32),
        logged_by: &User,
        now: NaiveDateTime,
    ) -> Self {
        let (winner, loser) = if first.1 > second.1 {
            (first, second)
        } else {
            (second, first)
        };

        Self {
            winner: winner.0.clone(),
            winner_score: winner.1,
            loser_score: loser.1,
            loser: loser.0.clone(),
            served: first.0.clone(),
            played_at: now,
            logged_at: now,
            logged_by: logged_by.clone(),
            result_id: Uuid::new_v4(),
        }
    }

    /// Substitute for `original`: same id and played time, new scores and log metadata
    pub fn replacing(self, original: &MatchResult) -> Self {
        Self {
            played_at: original.played_at,
            result_id: original.result_id,
            ..self
        }
    }

    pub fn played_on(&self) -> NaiveDate {
        self.played_at.date()
    }

    fn winner_served(&self) -> bool {
        self.served == self.winner
    }

    pub fn server_score(&self) -> i32 {
        if self.winner_served() {
            self.winner_score
        } else {
            self.loser_score
        }
    }

    pub fn receiver(&self) -> &User {
        if self.winner_served() {
            &self.loser
        } else {
            &self.winner
        }
    }

    pub fn receiver_score(&self) -> i32 {
        if self.winner_served() {
            self.loser_score
        } else {
            self.winner_score
        }
    }

    pub fn involves(&self, player: &User) -> bool {
        &self.winner == player || &self.loser == player
    }

    /// Points scored by `player`, if they played in this match
    pub fn score_of(&self, player: &User) -> Option<i32> {
        if &self.winner == player {
            Some(self.winner_score)
        } else if &self.loser == player {
            Some(self.loser_score)
        } else {
            None
        }
    }

    pub fn point_difference(&self) -> i32 {
        self.winner_score - self.loser_score
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.winner.name(),
            self.winner_score,
            self.loser_score,
            self.loser.name()
        )
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} beat {} {}-{} on {}",
            self.winner.name(),
            self.loser.name(),
            self.winner_score,
            self.loser_score,
            self.played_on()
        )
    }
}

/// Fields a match history can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MatchField {
    Winner,
    WinnerScore,
    LoserScore,
    Loser,
    Served,
    PlayedAt,
    LoggedAt,
    LoggedBy,
    ResultId,
}

impl MatchField {
    fn compare(self, a: &MatchResult, b: &MatchResult) -> Ordering {
        match self {
            MatchField::Winner => a.winner.name().cmp(b.winner.name()),
            MatchField::WinnerScore => a.winner_score.cmp(&b.winner_score),
            MatchField::LoserScore => a.loser_score.cmp(&b.loser_score),
            MatchField::Loser => a.loser.name().cmp(b.loser.name()),
            MatchField::Served => a.served.name().cmp(b.served.name()),
            MatchField::PlayedAt => a.played_at.cmp(&b.played_at),
            MatchField::LoggedAt => a.logged_at.cmp(&b.logged_at),
            MatchField::LoggedBy => a.logged_by.name().cmp(b.logged_by.name()),
            MatchField::ResultId => a.result_id.cmp(&b.result_id),
        }
    }
}

/// A guild's match history in storage order.
///
/// Every operation returns a new collection and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matches {
    results: Vec<MatchResult>,
}

impl Matches {
    pub fn new(results: Vec<MatchResult>) -> Self {
        Self { results }
    }

    pub fn add(&self, result: MatchResult) -> Self {
        let mut results = self.results.clone();
        results.push(result);
        Self { results }
    }

    /// Swaps in `result` wherever a match with the same `result_id` sits
    pub fn replace(&self, result: MatchResult) -> Result<Self, MatchTrackerError> {
        let index = self
            .results
            .iter()
            .position(|existing| existing.result_id == result.result_id)
            .ok_or(MatchTrackerError::ResultNotFound(result.result_id))?;

        let mut results = self.results.clone();
        results[index] = result;
        Ok(Self { results })
    }

    pub fn sort_by(&self, field: &str) -> Result<Self, MatchTrackerError> {
        let field: MatchField = field
            .parse()
            .map_err(|_| MatchTrackerError::FieldDoesNotExist(field.to_string()))?;
        Ok(self.sort_by_field(field))
    }

    /// Stable ascending sort
    pub fn sort_by_field(&self, field: MatchField) -> Self {
        let mut results = self.results.clone();
        results.sort_by(|a, b| field.compare(a, b));
        Self { results }
    }

    pub fn from_date(&self, date: NaiveDate) -> Self {
        self.filtered(|result| result.played_on() >= date)
    }

    pub fn on_date(&self, date: NaiveDate) -> Self {
        self.filtered(|result| result.played_on() == date)
    }

    pub fn involves(&self, player: &User) -> Self {
        self.filtered(|result| result.involves(player))
    }

    /// The final `n` matches in the current order
    pub fn last(&self, n: usize) -> Self {
        let start = self.results.len().saturating_sub(n);
        Self {
            results: self.results[start..].to_vec(),
        }
    }

    pub fn most_recent_date(&self) -> Option<NaiveDate> {
        self.results.iter().map(MatchResult::played_on).max()
    }

    /// Distinct play dates, ascending
    pub fn played_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<_> = self.results.iter().map(MatchResult::played_on).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    pub fn find(&self, result_id: Uuid) -> Option<&MatchResult> {
        self.results
            .iter()
            .find(|result| result.result_id == result_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&MatchResult) -> bool) -> Self {
        Self {
            results: self.results.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = &'a MatchResult;
    type IntoIter = std::slice::Iter<'a, MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
