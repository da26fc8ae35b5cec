mod crush;
mod first_win;
mod mvp;
mod streaks;
mod sweep;

pub use crush::CrushCollector;
pub use first_win::FirstWinAgainstCollector;
pub use mvp::MvpCollector;
pub use streaks::{StreakBreakerCollector, StreakCollector};
pub use sweep::{CleanSweepCollector, WoodenSpoonCollector};

use super::{Badge, BadgeKind};
use crate::match_tracker::models::MatchResult;

/// A fold over the match history that finishes into badges.
///
/// `observe` is called once per match in history order, then `finish` once.
pub trait BadgeCollector: Sized {
    fn observe(self, result: &MatchResult) -> Self;

    fn finish(self) -> Vec<Badge>;
}

/// One collector of any kind, so several kinds can share a single pass
#[derive(Debug, Clone)]
pub enum Collector {
    Crush(CrushCollector),
    CleanSweep(CleanSweepCollector),
    WoodenSpoon(WoodenSpoonCollector),
    Streak(StreakCollector),
    StreakBreaker(StreakBreakerCollector),
    FirstWinAgainst(FirstWinAgainstCollector),
    Mvp(MvpCollector),
}

impl Collector {
    pub fn for_kind(kind: BadgeKind) -> Self {
        match kind {
            BadgeKind::Crush => Collector::Crush(CrushCollector::default()),
            BadgeKind::CleanSweep => Collector::CleanSweep(CleanSweepCollector::default()),
            BadgeKind::WoodenSpoon => Collector::WoodenSpoon(WoodenSpoonCollector::default()),
            BadgeKind::WinStreak => Collector::Streak(StreakCollector::wins()),
            BadgeKind::LossStreak => Collector::Streak(StreakCollector::losses()),
            BadgeKind::StreakBreaker => {
                Collector::StreakBreaker(StreakBreakerCollector::default())
            }
            BadgeKind::FirstWinAgainst => {
                Collector::FirstWinAgainst(FirstWinAgainstCollector::default())
            }
            BadgeKind::Mvp => Collector::Mvp(MvpCollector::default()),
        }
    }
}

impl BadgeCollector for Collector {
    fn observe(self, result: &MatchResult) -> Self {
        match self {
            Collector::Crush(c) => Collector::Crush(c.observe(result)),
            Collector::CleanSweep(c) => Collector::CleanSweep(c.observe(result)),
            Collector::WoodenSpoon(c) => Collector::WoodenSpoon(c.observe(result)),
            Collector::Streak(c) => Collector::Streak(c.observe(result)),
            Collector::StreakBreaker(c) => Collector::StreakBreaker(c.observe(result)),
            Collector::FirstWinAgainst(c) => Collector::FirstWinAgainst(c.observe(result)),
            Collector::Mvp(c) => Collector::Mvp(c.observe(result)),
        }
    }

    fn finish(self) -> Vec<Badge> {
        match self {
            Collector::Crush(c) => c.finish(),
            Collector::CleanSweep(c) => c.finish(),
            Collector::WoodenSpoon(c) => c.finish(),
            Collector::Streak(c) => c.finish(),
            Collector::StreakBreaker(c) => c.finish(),
            Collector::FirstWinAgainst(c) => c.finish(),
            Collector::Mvp(c) => c.finish(),
        }
    }
}

/// Runs a single collector over `results`
pub fn run<C: BadgeCollector>(collector: C, results: &[MatchResult]) -> Vec<Badge> {
    results
        .iter()
        .fold(collector, |collector, result| collector.observe(result))
        .finish()
}
