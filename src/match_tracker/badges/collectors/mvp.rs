use super::BadgeCollector;
use crate::match_tracker::badges::{Award, Badge};
use crate::match_tracker::models::MatchResult;
use crate::match_tracker::player_map::PlayerMap;
use crate::match_tracker::tally::PointAverage;

#[derive(Debug, Clone, Default)]
struct PointRecord {
    difference: i64,
    matches: u32,
    last_match: Option<MatchResult>,
}

impl PointRecord {
    fn add(&mut self, difference: i32, result: &MatchResult) {
        self.difference += i64::from(difference);
        self.matches += 1;
        self.last_match = Some(result.clone());
    }
}

/// The single player with the strictly highest positive average point difference
#[derive(Debug, Clone, Default)]
pub struct MvpCollector {
    records: PlayerMap<PointRecord>,
}

impl BadgeCollector for MvpCollector {
    fn observe(mut self, result: &MatchResult) -> Self {
        let difference = result.point_difference();
        self.records.entry(&result.winner).add(difference, result);
        self.records.entry(&result.loser).add(-difference, result);
        self
    }

    fn finish(self) -> Vec<Badge> {
        let averages: Vec<_> = self
            .records
            .into_iter()
            .map(|(player, record)| {
                let average = PointAverage::new(record.difference, record.matches);
                (player, average, record.last_match)
            })
            .collect();

        let Some(best) = averages.iter().map(|(_, average, _)| *average).max() else {
            return Vec::new();
        };
        if !best.is_positive() {
            return Vec::new();
        }

        let mut leaders = averages
            .into_iter()
            .filter(|(_, average, _)| *average == best);
        match (leaders.next(), leaders.next()) {
            (Some((player, average, Some(earned_in))), None) => vec![Badge {
                award: Award::Mvp {
                    player,
                    average_point_difference: average,
                },
                earned_in,
            }],
            _ => Vec::new(),
        }
    }
}
