use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};

use super::badges::{
    collect_badges, deduplicate_badges, filter_badges_by_session, rank_badges, BadgeKind,
};
use super::errors::MatchTrackerError;
use super::filterers::session_date;
use super::models::{MatchResult, Matches};
use super::option_names;
use super::player_map::PlayerMap;
use super::table::{code_block, TextTable};
use super::tally::{build_tally_by_player, PointAverage, TallyData};
use crate::core::command::CommandOptions;
use crate::core::user::User;

/// Heading for a play date, e.g. `Monday, 1 January 2024`
pub const DATE_HEADING: &str = "%A, %-d %B %Y";

/// Head-to-head recent form needs at least this many matches
pub const RECENT_FORM_MATCHES: usize = 5;

/// Badges listed in a session summary
pub const SESSION_BADGE_LIMIT: usize = 5;

/// Renders a match list as display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// One line per match, server first
    Basic,
    /// Tables grouped by play date; expects matches with equal dates adjacent
    PlayedAt { show_ids: bool },
    LeagueTable,
    /// Comparison of the `player-one` and `player-two` options
    HeadToHead,
    /// League table and badges for the session picked by the `date` option
    SessionSummary,
}

impl Formatter {
    pub fn format(
        &self,
        matches: &Matches,
        options: &CommandOptions,
        now: NaiveDateTime,
    ) -> Result<String, MatchTrackerError> {
        match self {
            Formatter::Basic => Ok(basic(matches)),
            Formatter::PlayedAt { show_ids } => Ok(played_at(matches, *show_ids)),
            Formatter::LeagueTable => Ok(code_block(&league_table(matches).render())),
            Formatter::HeadToHead => head_to_head(matches, options, now),
            Formatter::SessionSummary => session_summary(matches, options),
        }
    }
}

fn basic(matches: &Matches) -> String {
    matches
        .iter()
        .map(|result| {
            format!(
                "{} {} - {} {}",
                result.served.name(),
                result.server_score(),
                result.receiver_score(),
                result.receiver().name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn match_row(result: &MatchResult, show_id: bool) -> Vec<String> {
    let mut row = vec![
        result.served.name().to_string(),
        result.server_score().to_string(),
        "-".to_string(),
        result.receiver_score().to_string(),
        result.receiver().name().to_string(),
    ];
    if show_id {
        row.push(result.result_id.to_string());
    }
    row
}

fn played_at(matches: &Matches, show_ids: bool) -> String {
    let mut groups: Vec<(NaiveDate, TextTable)> = Vec::new();
    for result in matches {
        let played_on = result.played_on();
        if groups.last().map(|(date, _)| *date) != Some(played_on) {
            groups.push((played_on, TextTable::new()));
        }
        if let Some((_, table)) = groups.last_mut() {
            table.push_row(match_row(result, show_ids));
        }
    }

    let body = groups
        .iter()
        .map(|(date, table)| format!("{}:\n{}", date.format(DATE_HEADING), table.render()))
        .collect::<Vec<_>>()
        .join("\n\n");
    code_block(&body)
}

#[derive(Debug, Clone, Default)]
struct Standing {
    wins: u32,
    losses: u32,
}

impl Standing {
    /// Truncated to a whole percentage
    fn win_percentage(&self) -> u32 {
        let played = self.wins + self.losses;
        if played == 0 {
            return 0;
        }
        self.wins * 100 / played
    }
}

fn league_table(matches: &Matches) -> TextTable {
    let mut standings: PlayerMap<Standing> = PlayerMap::new();
    for result in matches {
        standings.entry(&result.winner).wins += 1;
        standings.entry(&result.loser).losses += 1;
    }

    let mut rows: Vec<(User, Standing)> = standings.into_iter().collect();
    rows.sort_by_key(|(_, standing)| std::cmp::Reverse(standing.win_percentage()));

    let mut table = TextTable::with_header(["Player", "Wins", "Losses", "Win%"]);
    for (player, standing) in rows {
        table.push_row([
            player.name().to_string(),
            standing.wins.to_string(),
            standing.losses.to_string(),
            format!("{}%", standing.win_percentage()),
        ]);
    }
    table
}

fn head_to_head(
    matches: &Matches,
    options: &CommandOptions,
    now: NaiveDateTime,
) -> Result<String, MatchTrackerError> {
    let player_one = options
        .user(option_names::PLAYER_ONE)
        .ok_or(MatchTrackerError::MissingOption(option_names::PLAYER_ONE))?;
    let player_two = options
        .user(option_names::PLAYER_TWO)
        .ok_or(MatchTrackerError::MissingOption(option_names::PLAYER_TWO))?;

    if matches.is_empty() {
        return Ok(format!(
            "{} and {} have not played each other yet.",
            player_one.name(),
            player_two.name()
        ));
    }

    let all_time = Comparison::new(matches, player_one, player_two);
    let mut sections = vec![format!(
        "All time ({} matches)\n{}",
        matches.len(),
        all_time.table(None, now).render()
    )];

    if matches.len() >= RECENT_FORM_MATCHES {
        let recent = Comparison::new(&matches.last(RECENT_FORM_MATCHES), player_one, player_two);
        sections.push(format!(
            "Last {RECENT_FORM_MATCHES} matches\n{}",
            recent.table(Some(&all_time), now).render()
        ));
    }

    Ok(code_block(&sections.join("\n\n")))
}

type RateMetric = fn(&TallyData) -> Option<i64>;
type PlainMetric = fn(&TallyData, NaiveDateTime) -> String;

/// Tallies of two players over the same set of matches
struct Comparison<'a> {
    players: [&'a User; 2],
    tallies: [TallyData; 2],
}

impl<'a> Comparison<'a> {
    fn new(matches: &Matches, player_one: &'a User, player_two: &'a User) -> Self {
        let by_player = build_tally_by_player(matches);
        let tally = |player: &User| by_player.get(player).cloned().unwrap_or_default();
        Self {
            players: [player_one, player_two],
            tallies: [tally(player_one), tally(player_two)],
        }
    }

    /// Rate metrics carry a trend glyph when compared against a `baseline`
    fn table(&self, baseline: Option<&Comparison<'_>>, now: NaiveDateTime) -> TextTable {
        let mut table =
            TextTable::with_header(["", self.players[0].name(), self.players[1].name()]);

        table.push_row(self.plain_row("Wins", now, |tally, _| tally.wins.to_string()));
        table.push_row(self.rate_row(
            "Win rate",
            baseline,
            |tally| Some(i64::from(tally.win_rate())),
            |value| format!("{value}%"),
        ));
        table.push_row(self.rate_row(
            "Serving win rate",
            baseline,
            |tally| tally.win_rate_serving().map(i64::from),
            |value| format!("{value}%"),
        ));
        table.push_row(self.plain_row("Point difference", now, |tally, _| {
            format!("{:+}", tally.point_difference())
        }));
        table.push_row(self.rate_row(
            "Avg point difference",
            baseline,
            |tally| Some(tally.average_point_difference().hundredths()),
            |value| PointAverage::from_hundredths(value).to_string(),
        ));
        table.push_row(self.plain_row("Current win streak", now, |tally, _| {
            tally.current_win_streak.to_string()
        }));
        table.push_row(self.plain_row("Best win streak", now, |tally, _| {
            tally.highest_win_streak.to_string()
        }));
        table.push_row(self.plain_row("Days since last win", now, |tally, now| {
            tally
                .last_win_days_ago(now)
                .map_or_else(|| "-".to_string(), |days| days.to_string())
        }));
        table
    }

    fn plain_row(&self, label: &str, now: NaiveDateTime, value: PlainMetric) -> Vec<String> {
        let mut row = vec![label.to_string()];
        row.extend(self.tallies.iter().map(|tally| value(tally, now)));
        row
    }

    fn rate_row(
        &self,
        label: &str,
        baseline: Option<&Comparison<'_>>,
        metric: RateMetric,
        render: fn(i64) -> String,
    ) -> Vec<String> {
        let mut row = vec![label.to_string()];
        for (index, tally) in self.tallies.iter().enumerate() {
            let cell = match metric(tally) {
                None => "-".to_string(),
                Some(value) => match baseline.and_then(|base| metric(&base.tallies[index])) {
                    Some(base) => format!("{} {}", render(value), trend(value, base)),
                    None => render(value),
                },
            };
            row.push(cell);
        }
        row
    }
}

fn trend(value: i64, baseline: i64) -> &'static str {
    match value.cmp(&baseline) {
        Ordering::Greater => "▲",
        Ordering::Less => "▼",
        Ordering::Equal => "⏸",
    }
}

fn session_summary(matches: &Matches, options: &CommandOptions) -> Result<String, MatchTrackerError> {
    let date = session_date(matches, options)?;
    let session = matches.on_date(date);
    if session.is_empty() {
        return Ok(format!(
            "No matches were played on {}.",
            date.format(DATE_HEADING)
        ));
    }

    let mut badges = collect_badges(matches, &BadgeKind::ALL_TIME);
    badges.extend(collect_badges(&session, &BadgeKind::SESSION));
    let badges = rank_badges(deduplicate_badges(filter_badges_by_session(&badges, date)));

    let mut message = code_block(&format!(
        "Session summary for {}\n\n{}",
        date.format(DATE_HEADING),
        league_table(&session).render()
    ));
    if !badges.is_empty() {
        message.push_str("\nBadges:");
        for badge in badges.iter().take(SESSION_BADGE_LIMIT) {
            message.push_str(&format!("\n- {}", badge.display()));
        }
    }
    Ok(message)
}
