use super::BadgeCollector;
use crate::core::user::User;
use crate::match_tracker::badges::{Award, Badge};
use crate::match_tracker::models::MatchResult;

/// The first match in which each (winner, loser) ordering occurred
#[derive(Debug, Clone, Default)]
pub struct FirstWinAgainstCollector {
    first_wins: Vec<((User, User), MatchResult)>,
}

impl BadgeCollector for FirstWinAgainstCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        let seen = self
            .first_wins
            .iter()
            .any(|((winner, loser), _)| winner == &result.winner && loser == &result.loser);
        if !seen {
            self.first_wins.push((
                (result.winner.clone(), result.loser.clone()),
                result.clone(),
            ));
        }
        self
    }

    fn finish(self) -> Vec<Badge> {
        self.first_wins
            .into_iter()
            .map(|((player, opponent), earned_in)| Badge {
                award: Award::FirstWinAgainst { player, opponent },
                earned_in,
            })
            .collect()
    }
}
