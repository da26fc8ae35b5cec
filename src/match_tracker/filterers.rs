use chrono::NaiveDate;

use super::errors::MatchTrackerError;
use super::models::Matches;
use super::option_names;
use crate::core::command::CommandOptions;

/// Default window for [`Filterer::LastN`]
pub const RECENT_MATCH_COUNT: usize = 15;

/// Selects the subset of a history a query command works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filterer {
    Noop,
    /// The final `n` matches in storage order
    LastN(usize),
    /// Matches on or after the `from-date` option, everything when absent
    FromDate,
    /// Matches on the `date` option, or on the most recent play date
    LastSessionOrDate,
    /// Matches between the `player-one` and `player-two` options
    HeadToHead,
}

impl Filterer {
    pub fn filter(
        &self,
        matches: &Matches,
        options: &CommandOptions,
    ) -> Result<Matches, MatchTrackerError> {
        match self {
            Filterer::Noop => Ok(matches.clone()),
            Filterer::LastN(n) => Ok(matches.last(*n)),
            Filterer::FromDate => match date_option(options, option_names::FROM_DATE)? {
                Some(date) => Ok(matches.from_date(date)),
                None => Ok(matches.clone()),
            },
            Filterer::LastSessionOrDate => {
                let date = session_date(matches, options)?;
                Ok(matches.on_date(date))
            }
            Filterer::HeadToHead => {
                let player_one = options
                    .user(option_names::PLAYER_ONE)
                    .ok_or(MatchTrackerError::MissingOption(option_names::PLAYER_ONE))?;
                let player_two = options
                    .user(option_names::PLAYER_TWO)
                    .ok_or(MatchTrackerError::MissingOption(option_names::PLAYER_TWO))?;
                Ok(matches.involves(player_one).involves(player_two))
            }
        }
    }
}

/// The `date` option, falling back to the latest date in the history.
///
/// An empty history with no explicit date has no session to pick.
pub fn session_date(
    matches: &Matches,
    options: &CommandOptions,
) -> Result<NaiveDate, MatchTrackerError> {
    match date_option(options, option_names::DATE)? {
        Some(date) => Ok(date),
        None => matches
            .most_recent_date()
            .ok_or(MatchTrackerError::EmptyHistory),
    }
}

fn date_option(
    options: &CommandOptions,
    name: &str,
) -> Result<Option<NaiveDate>, MatchTrackerError> {
    match options.string(name) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| MatchTrackerError::InvalidDate(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::OptionValue;
    use crate::match_tracker::test_support::{at, history, match_result, user};
    use rstest::rstest;

    fn sessions() -> Matches {
        let (one, two) = (user("1"), user("2"));
        Matches::new(vec![
            match_result(&one, 11, &two, 3, at(2021, 1, 1, 12)),
            match_result(&one, 11, &two, 3, at(2021, 1, 2, 12)),
            match_result(&two, 11, &one, 3, at(2021, 1, 2, 13)),
        ])
    }

    fn with_string(name: &str, value: &str) -> CommandOptions {
        CommandOptions::new().with(name, OptionValue::String(value.to_string()))
    }

    #[rstest]
    #[case(Some("2021-01-01"), 1)]
    #[case(Some("2021-01-02"), 2)]
    #[case(Some("2020-12-25"), 0)]
    #[case(None, 2)]
    fn last_session_or_date(#[case] date: Option<&str>, #[case] expected: usize) {
        let options = match date {
            Some(date) => with_string("date", date),
            None => CommandOptions::new(),
        };

        let filtered = Filterer::LastSessionOrDate
            .filter(&sessions(), &options)
            .unwrap();
        assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn last_session_of_empty_history_is_an_error() {
        let result = Filterer::LastSessionOrDate.filter(&Matches::default(), &CommandOptions::new());
        assert!(matches!(result, Err(MatchTrackerError::EmptyHistory)));
    }

    #[rstest]
    #[case(None, 3)]
    #[case(Some("2021-01-02"), 2)]
    #[case(Some("2021-01-03"), 0)]
    fn from_date(#[case] date: Option<&str>, #[case] expected: usize) {
        let options = match date {
            Some(date) => with_string("from-date", date),
            None => CommandOptions::new(),
        };

        let filtered = Filterer::FromDate.filter(&sessions(), &options).unwrap();
        assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn invalid_date_is_reported() {
        let result = Filterer::FromDate.filter(&sessions(), &with_string("from-date", "yesterday"));
        assert!(matches!(result, Err(MatchTrackerError::InvalidDate(value)) if value == "yesterday"));
    }

    #[test]
    fn last_n_keeps_the_tail() {
        let matches = sessions();
        let filtered = Filterer::LastN(2)
            .filter(&matches, &CommandOptions::new())
            .unwrap();
        assert_eq!(filtered.as_slice(), &matches.as_slice()[1..]);
    }

    #[test]
    fn head_to_head_requires_both_players() {
        let (k, s, r) = (user("K"), user("S"), user("R"));
        let matches = history(at(2024, 1, 1, 18), &[(&k, &s), (&s, &r), (&s, &k)]);
        let options = CommandOptions::new()
            .with("player-one", OptionValue::User(k.clone()))
            .with("player-two", OptionValue::User(s.clone()));

        let filtered = Filterer::HeadToHead.filter(&matches, &options).unwrap();
        assert_eq!(filtered.len(), 2);

        let missing = Filterer::HeadToHead.filter(
            &matches,
            &CommandOptions::new().with("player-one", OptionValue::User(k)),
        );
        assert!(matches!(missing, Err(MatchTrackerError::MissingOption("player-two"))));
    }
}
