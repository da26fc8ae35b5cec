use super::BadgeCollector;
use crate::core::user::User;
use crate::match_tracker::badges::{Award, Badge};
use crate::match_tracker::models::MatchResult;
use crate::match_tracker::player_map::PlayerMap;

/// Players who won at least once and never lost
#[derive(Debug, Clone, Default)]
pub struct CleanSweepCollector {
    last_win: PlayerMap<MatchResult>,
    lost: Vec<User>,
}

impl BadgeCollector for CleanSweepCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        self.last_win.insert(&result.winner, result.clone());
        if !self.lost.contains(&result.loser) {
            self.lost.push(result.loser.clone());
        }
        self
    }

    fn finish(self) -> Vec<Badge> {
        let lost = self.lost;
        self.last_win
            .into_iter()
            .filter(|(player, _)| !lost.contains(player))
            .map(|(player, earned_in)| Badge {
                award: Award::CleanSweep { player },
                earned_in,
            })
            .collect()
    }
}

/// Players who lost at least once and never won
#[derive(Debug, Clone, Default)]
pub struct WoodenSpoonCollector {
    last_loss: PlayerMap<MatchResult>,
    won: Vec<User>,
}

impl BadgeCollector for WoodenSpoonCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        self.last_loss.insert(&result.loser, result.clone());
        if !self.won.contains(&result.winner) {
            self.won.push(result.winner.clone());
        }
        self
    }

    fn finish(self) -> Vec<Badge> {
        let won = self.won;
        self.last_loss
            .into_iter()
            .filter(|(player, _)| !won.contains(player))
            .map(|(player, earned_in)| Badge {
                award: Award::WoodenSpoon { player },
                earned_in,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_tracker::badges::collectors::run;
    use crate::match_tracker::test_support::{at, history, user};

    #[test]
    fn clean_sweep_attributed_to_last_win() {
        let (k, s, r) = (user("K"), user("S"), user("R"));
        let matches = history(at(2024, 1, 1, 18), &[(&k, &s), (&s, &r), (&k, &r)]);

        let badges = run(CleanSweepCollector::default(), matches.as_slice());
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].display(), "K won all of their games");
        assert_eq!(badges[0].earned_in, matches.as_slice()[2]);
    }

    #[test]
    fn wooden_spoon_attributed_to_last_loss() {
        let (k, s, r) = (user("K"), user("S"), user("R"));
        let matches = history(at(2024, 1, 1, 18), &[(&k, &s), (&s, &r), (&k, &r)]);

        let badges = run(WoodenSpoonCollector::default(), matches.as_slice());
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].display(), "R lost all of their games");
        assert_eq!(badges[0].earned_in, matches.as_slice()[2]);
    }

    #[test]
    fn mixed_records_earn_nothing() {
        let (k, s) = (user("K"), user("S"));
        let matches = history(at(2024, 1, 1, 18), &[(&k, &s), (&s, &k)]);

        assert!(run(CleanSweepCollector::default(), matches.as_slice()).is_empty());
        assert!(run(WoodenSpoonCollector::default(), matches.as_slice()).is_empty());
    }
}
