use chrono::NaiveDateTime;

use super::errors::MatchTrackerError;
use super::filterers::Filterer;
use super::formatters::Formatter;
use super::models::Matches;
use super::orderers::Orderer;
use crate::core::command::CommandOptions;

/// The filter, order and format strategies a query command is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPipeline {
    pub filterer: Filterer,
    pub orderer: Orderer,
    pub formatter: Formatter,
}

impl QueryPipeline {
    pub fn new(filterer: Filterer, orderer: Orderer, formatter: Formatter) -> Self {
        Self {
            filterer,
            orderer,
            formatter,
        }
    }

    pub fn run(
        &self,
        matches: &Matches,
        options: &CommandOptions,
        now: NaiveDateTime,
    ) -> Result<String, MatchTrackerError> {
        let filtered = self.filterer.filter(matches, options)?;
        let ordered = self.orderer.order(&filtered, options);
        self.formatter.format(&ordered, options, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_tracker::test_support::{at, match_result, user};

    #[test]
    fn filters_before_ordering() {
        let (a, b) = (user("A"), user("B"));
        let matches = Matches::new(vec![
            match_result(&a, 11, &b, 1, at(2024, 1, 3, 19)),
            match_result(&a, 11, &b, 2, at(2024, 1, 1, 19)),
            match_result(&a, 11, &b, 3, at(2024, 1, 2, 19)),
        ]);
        let pipeline = QueryPipeline::new(Filterer::LastN(2), Orderer::PlayedAt, Formatter::Basic);

        let text = pipeline
            .run(&matches, &CommandOptions::new(), at(2024, 1, 4, 0))
            .unwrap();
        assert_eq!(text, "A 11 - 2 B\nA 11 - 3 B");
    }
}
