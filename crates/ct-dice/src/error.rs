//! Error types for the dice engine.

use thiserror::Error;

/// Result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors that can occur while rolling or evaluating dice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// Nothing to roll.
    #[error("No dice to roll.")]
    NoDice,

    /// More dice were requested than the pouch holds.
    #[error("I only have {max} dice. =(")]
    TooManyDice {
        /// Dice requested.
        requested: u64,
        /// The per-roll limit.
        max: u32,
    },

    /// A die with zero sides was requested.
    #[error("I don't have any dice with {0} sides. =(")]
    InvalidSides(u64),

    /// No kept die shows the face that should be rerolled.
    #[error("no die shows {0}")]
    NoFaceToReroll(u32),

    /// The expression could not be parsed or evaluated.
    #[error("syntax error in '{expression}': {message}")]
    Syntax {
        /// The offending expression.
        expression: String,
        /// What went wrong.
        message: String,
    },

    /// Arithmetic overflowed.
    #[error("the result is too large to count")]
    Overflow,

    /// No options were given to choose from.
    #[error("I'd choose an option, but you didn't give me any.")]
    NoChoices,
}

impl DiceError {
    pub(crate) fn syntax(expression: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            expression: expression.to_string(),
            message: message.into(),
        }
    }
}
