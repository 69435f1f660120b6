use thiserror::Error;

use super::Card;

/// This is the core error type for the crate.
///
/// Everything that fails a precondition (bad card codes, duplicate cards,
/// boards of the wrong size) ends up here. An empty range after conflict
/// filtering is deliberately not an error; see
/// [`crate::holdem::RangeOutcome`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OddsError {
    #[error("Unable to parse value '{0}'")]
    UnexpectedValueChar(char),
    #[error("Unable to parse suit '{0}'")]
    UnexpectedSuitChar(char),
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("A board holds 3, 4 or 5 cards, found {0}")]
    InvalidBoardSize(usize),
    #[error("Distributions are computed from the flop, found a board of {0} cards")]
    FlopRequired(usize),
    #[error("Probability row for the {street} does not sum to one (sum = {sum})")]
    RowNotStochastic { street: &'static str, sum: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unable to expand range expression '{expression}': {reason}")]
    RangeExpression { expression: String, reason: String },
}
