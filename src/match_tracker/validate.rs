use thiserror::Error;

use super::models::MatchResult;

/// Squash scoring rule violations, checked in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Winner must score at least 11 points")]
    WinnerBelowEleven,

    #[error("Winner score must be greater than loser score")]
    LoserOutscoredWinner,

    #[error("Cannot have a draw")]
    Draw,

    #[error("Scores must be positive")]
    NegativeScore,

    #[error("Winner must win by 2 points if they score more than 11 points")]
    NotWonByTwo,

    #[error("Winner and loser must be different players")]
    SamePlayer,

    #[error("The player who served must be one of the players in the match")]
    ServerNotInMatch,
}

pub fn validate_match_result(result: &MatchResult) -> Result<(), ValidationError> {
    if result.winner_score < 11 {
        return Err(ValidationError::WinnerBelowEleven);
    }
    if result.winner_score < result.loser_score {
        return Err(ValidationError::LoserOutscoredWinner);
    }
    if result.winner_score == result.loser_score {
        return Err(ValidationError::Draw);
    }
    if result.winner_score < 0 || result.loser_score < 0 {
        return Err(ValidationError::NegativeScore);
    }
    if result.winner_score > 11 && result.winner_score - result.loser_score != 2 {
        return Err(ValidationError::NotWonByTwo);
    }
    if result.winner == result.loser {
        return Err(ValidationError::SamePlayer);
    }
    if result.served != result.winner && result.served != result.loser {
        return Err(ValidationError::ServerNotInMatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_tracker::test_support::{at, match_result, user};
    use rstest::rstest;

    #[rstest]
    #[case(11, 0, None)]
    #[case(11, 9, None)]
    #[case(11, 10, None)]
    #[case(12, 10, None)]
    #[case(15, 13, None)]
    #[case(10, 8, Some(ValidationError::WinnerBelowEleven))]
    #[case(0, 0, Some(ValidationError::WinnerBelowEleven))]
    #[case(11, 13, Some(ValidationError::LoserOutscoredWinner))]
    #[case(11, 11, Some(ValidationError::Draw))]
    #[case(11, -1, Some(ValidationError::NegativeScore))]
    #[case(13, 12, Some(ValidationError::NotWonByTwo))]
    #[case(14, 10, Some(ValidationError::NotWonByTwo))]
    fn scoring_rules(
        #[case] winner_score: i32,
        #[case] loser_score: i32,
        #[case] expected: Option<ValidationError>,
    ) {
        let result = match_result(
            &user("1"),
            winner_score,
            &user("2"),
            loser_score,
            at(2024, 1, 1, 19),
        );

        assert_eq!(validate_match_result(&result).err(), expected);
    }

    #[test]
    fn players_must_differ() {
        let result = match_result(&user("1"), 11, &user("1"), 3, at(2024, 1, 1, 19));
        assert_eq!(
            validate_match_result(&result),
            Err(ValidationError::SamePlayer)
        );
    }

    #[test]
    fn server_must_be_in_match() {
        let mut result = match_result(&user("1"), 11, &user("2"), 3, at(2024, 1, 1, 19));
        result.served = user("3");
        assert_eq!(
            validate_match_result(&result).unwrap_err().to_string(),
            "The player who served must be one of the players in the match"
        );
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            ValidationError::NotWonByTwo.to_string(),
            "Winner must win by 2 points if they score more than 11 points"
        );
        assert_eq!(ValidationError::Draw.to_string(), "Cannot have a draw");
    }
}
