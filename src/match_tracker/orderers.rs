use tracing::warn;

use super::models::{MatchField, Matches};
use super::option_names;
use crate::core::command::CommandOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orderer {
    Noop,
    /// Sorts by the `sort-by` option; absent or unknown fields leave the order alone
    SortByOption,
    /// Chronological, earliest first
    PlayedAt,
}

impl Orderer {
    pub fn order(&self, matches: &Matches, options: &CommandOptions) -> Matches {
        match self {
            Orderer::Noop => matches.clone(),
            Orderer::SortByOption => match options.string(option_names::SORT_BY) {
                None | Some("") => matches.clone(),
                Some(field) => matches.sort_by(field).unwrap_or_else(|err| {
                    warn!(field, error = %err, "Ignoring invalid sort field");
                    matches.clone()
                }),
            },
            Orderer::PlayedAt => matches.sort_by_field(MatchField::PlayedAt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::OptionValue;
    use crate::match_tracker::test_support::{at, match_result, user};

    fn unordered() -> Matches {
        let (one, two) = (user("1"), user("2"));
        Matches::new(vec![
            match_result(&one, 11, &two, 3, at(2021, 1, 1, 13)),
            match_result(&two, 11, &one, 9, at(2021, 1, 1, 12)),
        ])
    }

    #[test]
    fn played_at_is_chronological() {
        let matches = unordered();
        let ordered = Orderer::PlayedAt.order(&matches, &CommandOptions::new());

        assert_eq!(ordered.as_slice()[0], matches.as_slice()[1]);
        assert_eq!(ordered.as_slice()[1], matches.as_slice()[0]);
    }

    #[test]
    fn sort_by_option() {
        let matches = unordered();
        let options =
            CommandOptions::new().with("sort-by", OptionValue::String("loser_score".to_string()));

        let ordered = Orderer::SortByOption.order(&matches, &options);
        assert_eq!(ordered, matches);

        let options =
            CommandOptions::new().with("sort-by", OptionValue::String("played_at".to_string()));
        let ordered = Orderer::SortByOption.order(&matches, &options);
        assert_eq!(ordered.as_slice()[0], matches.as_slice()[1]);
    }

    #[test]
    fn unknown_sort_field_is_ignored() {
        let matches = unordered();
        let options =
            CommandOptions::new().with("sort-by", OptionValue::String("colour".to_string()));

        assert_eq!(Orderer::SortByOption.order(&matches, &options), matches);
        assert_eq!(
            Orderer::SortByOption.order(&matches, &CommandOptions::new()),
            matches
        );
    }
}
