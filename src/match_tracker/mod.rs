pub mod badges;
pub mod commands;
pub mod filterers;
pub mod formatters;
pub mod orderers;
pub mod pipeline;
pub mod repository;
pub mod table;
pub mod tally;
pub mod validate;

mod errors;
pub mod models;
pub mod player_map;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::MatchTrackerError;
pub use models::{MatchField, MatchResult, Matches};
pub use repository::{MatchRepository, StoredMatchRepository};
pub use validate::{validate_match_result, ValidationError};

/// Option names shared between command declarations and the query strategies
pub mod option_names {
    pub const PLAYER_ONE: &str = "player-one";
    pub const PLAYER_ONE_SCORE: &str = "player-one-score";
    pub const PLAYER_TWO: &str = "player-two";
    pub const PLAYER_TWO_SCORE: &str = "player-two-score";
    pub const MATCH_ID: &str = "match-id";
    pub const SORT_BY: &str = "sort-by";
    pub const SHOW_IDS: &str = "show-ids";
    pub const COMPACT: &str = "compact";
    pub const FROM_DATE: &str = "from-date";
    pub const DATE: &str = "date";
}
