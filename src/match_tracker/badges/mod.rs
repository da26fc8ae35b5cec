pub mod collectors;
pub mod priority;
pub mod queries;

pub use priority::{base_priority, priority};
pub use queries::{
    collect_badges, deduplicate_badges, filter_badges_by_result_id, filter_badges_by_session,
    rank_badges,
};

use std::fmt;

use strum_macros::{Display, EnumIter};

use super::models::MatchResult;
use super::tally::PointAverage;
use crate::core::user::User;

/// Minimum run length for streak related badges
pub const MIN_STREAK_LENGTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BadgeKind {
    Crush,
    CleanSweep,
    WoodenSpoon,
    WinStreak,
    LossStreak,
    StreakBreaker,
    FirstWinAgainst,
    #[strum(serialize = "MVP")]
    Mvp,
}

impl BadgeKind {
    /// Kinds that describe a player's whole history
    pub const ALL_TIME: [BadgeKind; 4] = [
        BadgeKind::WinStreak,
        BadgeKind::LossStreak,
        BadgeKind::StreakBreaker,
        BadgeKind::FirstWinAgainst,
    ];

    /// Kinds that only make sense within one session
    pub const SESSION: [BadgeKind; 4] = [
        BadgeKind::Crush,
        BadgeKind::CleanSweep,
        BadgeKind::WoodenSpoon,
        BadgeKind::Mvp,
    ];
}

/// What a badge was awarded for
#[derive(Debug, Clone, PartialEq)]
pub enum Award {
    Crush {
        player: User,
        opponent: User,
    },
    CleanSweep {
        player: User,
    },
    WoodenSpoon {
        player: User,
    },
    WinStreak {
        player: User,
        streak_length: u32,
        is_ongoing: bool,
    },
    LossStreak {
        player: User,
        streak_length: u32,
        is_ongoing: bool,
    },
    StreakBreaker {
        player: User,
        opponent: User,
        streak_length: u32,
    },
    FirstWinAgainst {
        player: User,
        opponent: User,
    },
    Mvp {
        player: User,
        average_point_difference: PointAverage,
    },
}

impl Award {
    pub fn kind(&self) -> BadgeKind {
        match self {
            Award::Crush { .. } => BadgeKind::Crush,
            Award::CleanSweep { .. } => BadgeKind::CleanSweep,
            Award::WoodenSpoon { .. } => BadgeKind::WoodenSpoon,
            Award::WinStreak { .. } => BadgeKind::WinStreak,
            Award::LossStreak { .. } => BadgeKind::LossStreak,
            Award::StreakBreaker { .. } => BadgeKind::StreakBreaker,
            Award::FirstWinAgainst { .. } => BadgeKind::FirstWinAgainst,
            Award::Mvp { .. } => BadgeKind::Mvp,
        }
    }

    /// The player the badge is about
    pub fn player(&self) -> &User {
        match self {
            Award::Crush { player, .. }
            | Award::CleanSweep { player }
            | Award::WoodenSpoon { player }
            | Award::WinStreak { player, .. }
            | Award::LossStreak { player, .. }
            | Award::StreakBreaker { player, .. }
            | Award::FirstWinAgainst { player, .. }
            | Award::Mvp { player, .. } => player,
        }
    }

    pub fn streak_length(&self) -> Option<u32> {
        match self {
            Award::WinStreak { streak_length, .. }
            | Award::LossStreak { streak_length, .. }
            | Award::StreakBreaker { streak_length, .. } => Some(*streak_length),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Award::Crush { player, opponent } => {
                format!("{} crushed {} 11-0", player.name(), opponent.name())
            }
            Award::CleanSweep { player } => format!("{} won all of their games", player.name()),
            Award::WoodenSpoon { player } => format!("{} lost all of their games", player.name()),
            Award::WinStreak {
                player,
                streak_length,
                ..
            } => format!("{} had a {streak_length} game win streak", player.name()),
            Award::LossStreak {
                player,
                streak_length,
                ..
            } => format!("{} had a {streak_length} game loss streak", player.name()),
            Award::StreakBreaker {
                player,
                opponent,
                streak_length,
            } => format!(
                "{} broke {}'s {streak_length} game win streak",
                player.name(),
                opponent.name()
            ),
            Award::FirstWinAgainst { player, opponent } => format!(
                "{} won their first game against {}",
                player.name(),
                opponent.name()
            ),
            Award::Mvp {
                player,
                average_point_difference,
            } => format!(
                "{} had the highest average point difference of {average_point_difference}",
                player.name()
            ),
        }
    }
}

/// A noteworthy pattern detected in the history. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub award: Award,
    /// The match the badge is attributed to
    pub earned_in: MatchResult,
}

impl Badge {
    pub fn new(award: Award, earned_in: &MatchResult) -> Self {
        Self {
            award,
            earned_in: earned_in.clone(),
        }
    }

    pub fn kind(&self) -> BadgeKind {
        self.award.kind()
    }

    pub fn player(&self) -> &User {
        self.award.player()
    }

    pub fn display(&self) -> String {
        self.award.display()
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.kind(),
            self.display(),
            self.earned_in.played_on().format("%Y-%m-%d")
        )
    }
}
