//! Error types for the command layer.

use thiserror::Error;

/// Result type for bot commands.
pub type BotResult<T> = Result<T, BotError>;

/// Errors that can occur while handling a command.
#[derive(Debug, Error)]
pub enum BotError {
    /// A command was called with missing or extra arguments.
    #[error("usage: {0}")]
    Usage(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Scene or registry error.
    #[error("{0}")]
    Tracker(#[from] ct_tracker::TrackerError),

    /// Dice error.
    #[error("{0}")]
    Dice(#[from] ct_dice::DiceError),
}
