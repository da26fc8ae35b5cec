use chrono::NaiveDate;
use uuid::Uuid;

use super::collectors::{BadgeCollector, Collector};
use super::{priority, Badge, BadgeKind};
use crate::match_tracker::models::Matches;

/// Collects the requested badge kinds in one pass over `matches`
pub fn collect_badges(matches: &Matches, kinds: &[BadgeKind]) -> Vec<Badge> {
    let collectors: Vec<Collector> = kinds.iter().copied().map(Collector::for_kind).collect();

    matches
        .iter()
        .fold(collectors, |collectors, result| {
            collectors
                .into_iter()
                .map(|collector| collector.observe(result))
                .collect()
        })
        .into_iter()
        .flat_map(Collector::finish)
        .collect()
}

/// Badges earned in matches played on `session_date`
pub fn filter_badges_by_session(badges: &[Badge], session_date: NaiveDate) -> Vec<Badge> {
    badges
        .iter()
        .filter(|badge| badge.earned_in.played_on() == session_date)
        .cloned()
        .collect()
}

/// Badges earned in the match with `result_id`
pub fn filter_badges_by_result_id(badges: &[Badge], result_id: Uuid) -> Vec<Badge> {
    badges
        .iter()
        .filter(|badge| badge.earned_in.result_id == result_id)
        .cloned()
        .collect()
}

/// Keeps one badge per (kind, player): the highest priority one, later wins on ties.
///
/// The survivor takes the position of the first badge with its key.
pub fn deduplicate_badges(badges: Vec<Badge>) -> Vec<Badge> {
    let mut kept: Vec<Badge> = Vec::with_capacity(badges.len());
    for badge in badges {
        let existing = kept
            .iter()
            .position(|kept| kept.kind() == badge.kind() && kept.player() == badge.player());
        match existing {
            Some(index) => {
                if priority(&badge) >= priority(&kept[index]) {
                    kept[index] = badge;
                }
            }
            None => kept.push(badge),
        }
    }
    kept
}

/// Stable sort by priority, highest first
pub fn rank_badges(mut badges: Vec<Badge>) -> Vec<Badge> {
    badges.sort_by(|a, b| priority(b).total_cmp(&priority(a)));
    badges
}
