use std::fmt;

use chrono::NaiveDateTime;

use super::models::{MatchResult, Matches};
use super::player_map::PlayerMap;

/// A per-match average held in hundredths, rounded half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PointAverage {
    hundredths: i64,
}

impl PointAverage {
    pub fn new(total: i64, count: u32) -> Self {
        if count == 0 {
            return Self::default();
        }
        let count = i64::from(count);
        let magnitude = (total.abs() * 200 + count) / (count * 2);
        Self {
            hundredths: magnitude * total.signum(),
        }
    }

    pub fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    pub fn hundredths(&self) -> i64 {
        self.hundredths
    }

    pub fn is_positive(&self) -> bool {
        self.hundredths > 0
    }
}

impl fmt::Display for PointAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hundredths < 0 { '-' } else { '+' };
        let magnitude = self.hundredths.abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

/// Aggregate statistics for one player over a match history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TallyData {
    pub number_matches: u32,
    pub wins: u32,
    pub wins_served: u32,
    pub losses_served: u32,
    pub wins_received: u32,
    pub losses_received: u32,
    /// Sum of the player's own points, won or lost
    pub total_score: i64,
    pub points_conceded: i64,
    pub current_win_streak: u32,
    pub current_loss_streak: u32,
    pub highest_win_streak: u32,
    pub highest_loss_streak: u32,
    pub last_win_datetime: Option<NaiveDateTime>,
}

impl TallyData {
    fn record_win(&mut self, result: &MatchResult, served: bool) {
        self.number_matches += 1;
        self.wins += 1;
        self.total_score += i64::from(result.winner_score);
        self.points_conceded += i64::from(result.loser_score);
        if served {
            self.wins_served += 1;
        } else {
            self.wins_received += 1;
        }
        self.current_win_streak += 1;
        self.current_loss_streak = 0;
        self.highest_win_streak = self.highest_win_streak.max(self.current_win_streak);
        self.last_win_datetime = Some(result.played_at);
    }

    fn record_loss(&mut self, result: &MatchResult, served: bool) {
        self.number_matches += 1;
        self.total_score += i64::from(result.loser_score);
        self.points_conceded += i64::from(result.winner_score);
        if served {
            self.losses_served += 1;
        } else {
            self.losses_received += 1;
        }
        self.current_loss_streak += 1;
        self.current_win_streak = 0;
        self.highest_loss_streak = self.highest_loss_streak.max(self.current_loss_streak);
    }

    pub fn losses(&self) -> u32 {
        self.number_matches - self.wins
    }

    pub fn matches_served(&self) -> u32 {
        self.wins_served + self.losses_served
    }

    pub fn win_rate(&self) -> u32 {
        percentage(self.wins, self.number_matches).unwrap_or_default()
    }

    /// `None` when the player never served
    pub fn win_rate_serving(&self) -> Option<u32> {
        percentage(self.wins_served, self.matches_served())
    }

    /// Integer division, floored
    pub fn average_score(&self) -> i64 {
        if self.number_matches == 0 {
            return 0;
        }
        self.total_score.div_euclid(i64::from(self.number_matches))
    }

    pub fn point_difference(&self) -> i64 {
        self.total_score - self.points_conceded
    }

    pub fn average_point_difference(&self) -> PointAverage {
        PointAverage::new(self.point_difference(), self.number_matches)
    }

    pub fn last_win_days_ago(&self, now: NaiveDateTime) -> Option<i64> {
        self.last_win_datetime
            .map(|last_win| (now - last_win).num_days())
    }
}

/// Whole percentage, exact halves rounded to the even neighbour
fn percentage(part: u32, whole: u32) -> Option<u32> {
    if whole == 0 {
        return None;
    }
    Some((f64::from(part) / f64::from(whole) * 100.0).round_ties_even() as u32)
}

/// Folds `matches` into per-player tallies in a single forward pass.
///
/// Streak and last-win figures follow input order, so pass chronologically
/// sorted matches when those should reflect time.
pub fn build_tally_by_player(matches: &Matches) -> PlayerMap<TallyData> {
    matches
        .iter()
        .fold(PlayerMap::new(), |mut tallies, result| {
            let winner_served = result.served == result.winner;
            tallies.entry(&result.winner).record_win(result, winner_served);
            tallies.entry(&result.loser).record_loss(result, !winner_served);
            tallies
        })
}
