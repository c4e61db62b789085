//! Chat command layer for the combat tracker.
//!
//! A [`Bot`] owns a [`ct_tracker::SceneRegistry`] keyed by room name and
//! turns prefixed chat lines (`.addactor Lee 3`, `.newround`, `.roll 2d6+1`)
//! into scene operations, dice rolls and one-line replies.

pub mod bot;
pub mod config;
pub mod error;

pub use bot::Bot;
pub use config::BotConfig;
pub use error::{BotError, BotResult};
