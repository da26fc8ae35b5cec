use super::BadgeCollector;
use crate::core::user::User;
use crate::match_tracker::badges::{Award, Badge, MIN_STREAK_LENGTH};
use crate::match_tracker::models::MatchResult;
use crate::match_tracker::player_map::PlayerMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Default)]
struct RunningStreak {
    length: u32,
    last_match: Option<MatchResult>,
}

/// Win or loss streaks of at least [`MIN_STREAK_LENGTH`] games.
///
/// A streak is emitted as finished when the opposite result ends it, and as
/// ongoing if it is still open once the history runs out.
#[derive(Debug, Clone)]
pub struct StreakCollector {
    outcome: Outcome,
    running: PlayerMap<RunningStreak>,
    finished: Vec<Badge>,
}

impl StreakCollector {
    pub fn wins() -> Self {
        Self::new(Outcome::Win)
    }

    pub fn losses() -> Self {
        Self::new(Outcome::Loss)
    }

    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            running: PlayerMap::new(),
            finished: Vec::new(),
        }
    }

    fn badge(&self, player: User, streak: RunningStreak, is_ongoing: bool) -> Option<Badge> {
        if streak.length < MIN_STREAK_LENGTH {
            return None;
        }
        let earned_in = streak.last_match?;
        let award = match self.outcome {
            Outcome::Win => Award::WinStreak {
                player,
                streak_length: streak.length,
                is_ongoing,
            },
            Outcome::Loss => Award::LossStreak {
                player,
                streak_length: streak.length,
                is_ongoing,
            },
        };
        Some(Badge { award, earned_in })
    }
}

impl BadgeCollector for StreakCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        let (extends, ends) = match self.outcome {
            Outcome::Win => (&result.winner, &result.loser),
            Outcome::Loss => (&result.loser, &result.winner),
        };

        let ended = std::mem::take(self.running.entry(ends));
        if let Some(badge) = self.badge(ends.clone(), ended, false) {
            self.finished.push(badge);
        }

        let streak = self.running.entry(extends);
        streak.length += 1;
        streak.last_match = Some(result.clone());
        self
    }

    fn finish(self) -> Vec<Badge> {
        let ongoing: Vec<Badge> = self
            .running
            .clone()
            .into_iter()
            .filter_map(|(player, streak)| self.badge(player, streak, true))
            .collect();

        let mut badges = self.finished;
        badges.extend(ongoing);
        badges
    }
}

/// Credits the player whose win ended someone else's win streak
#[derive(Debug, Clone, Default)]
pub struct StreakBreakerCollector {
    running: PlayerMap<u32>,
    broken: Vec<Badge>,
}

impl BadgeCollector for StreakBreakerCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        let ended = std::mem::take(self.running.entry(&result.loser));
        if ended >= MIN_STREAK_LENGTH {
            self.broken.push(Badge::new(
                Award::StreakBreaker {
                    player: result.winner.clone(),
                    opponent: result.loser.clone(),
                    streak_length: ended,
                },
                result,
            ));
        }
        *self.running.entry(&result.winner) += 1;
        self
    }

    fn finish(self) -> Vec<Badge> {
        self.broken
    }
}
