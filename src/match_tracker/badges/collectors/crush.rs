use super::BadgeCollector;
use crate::match_tracker::badges::{Award, Badge};
use crate::match_tracker::models::MatchResult;

/// One badge per game where the loser did not score
#[derive(Debug, Clone, Default)]
pub struct CrushCollector {
    crushed: Vec<MatchResult>,
}

impl BadgeCollector for CrushCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        if result.loser_score == 0 {
            self.crushed.push(result.clone());
        }
        self
    }

    fn finish(self) -> Vec<Badge> {
        self.crushed
            .into_iter()
            .map(|result| Badge {
                award: Award::Crush {
                    player: result.winner.clone(),
                    opponent: result.loser.clone(),
                },
                earned_in: result,
            })
            .collect()
    }
}
