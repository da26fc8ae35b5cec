use super::{Award, Badge, BadgeKind};

pub fn base_priority(kind: BadgeKind) -> f64 {
    match kind {
        BadgeKind::Crush => 4.0,
        BadgeKind::CleanSweep => 4.0,
        BadgeKind::WoodenSpoon => 1.0,
        BadgeKind::WinStreak => 2.0,
        BadgeKind::LossStreak => 1.0,
        BadgeKind::StreakBreaker => 3.0,
        BadgeKind::FirstWinAgainst => 4.0,
        BadgeKind::Mvp => 2.0,
    }
}

/// Base priority plus a tenth per game for win and loss streaks
pub fn priority(badge: &Badge) -> f64 {
    let bonus = match &badge.award {
        Award::WinStreak { streak_length, .. } | Award::LossStreak { streak_length, .. } => {
            f64::from(*streak_length) / 10.0
        }
        _ => 0.0,
    };
    base_priority(badge.kind()) + bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_tracker::test_support::{at, match_result, user};

    fn win_streak(length: u32) -> Badge {
        let (k, r) = (user("K"), user("R"));
        Badge::new(
            Award::WinStreak {
                player: k.clone(),
                streak_length: length,
                is_ongoing: false,
            },
            &match_result(&k, 11, &r, 3, at(2024, 1, 1, 19)),
        )
    }

    #[test]
    fn longer_streaks_rank_higher() {
        assert!(priority(&win_streak(5)) > priority(&win_streak(3)));
        assert!((priority(&win_streak(3)) - 2.3).abs() < 1e-9);
    }

    #[test]
    fn streak_bonus_stays_below_unrelated_kinds() {
        assert!(priority(&win_streak(9)) < base_priority(BadgeKind::StreakBreaker));
    }
}
