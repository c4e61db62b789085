//! Dice engine for the combat tracker.
//!
//! Rolls pouches of identical dice, drops or rerolls results, counts
//! storyteller-style successes, and evaluates arithmetic dice expressions
//! such as `3d6v1+2`.

pub mod choice;
pub mod error;
pub mod expr;
pub mod pouch;
pub mod storyteller;

pub use choice::{Choice, choose};
pub use error::{DiceError, DiceResult};
pub use expr::{ExpressionRoll, MAX_NESTING, roll_expression};
pub use pouch::{DicePouch, MAX_DICE};
pub use storyteller::{StorytellerCheck, StorytellerOutcome, parse_storyteller};
