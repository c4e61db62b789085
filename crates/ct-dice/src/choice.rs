//! Picking one option out of a delimited list.

use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{DiceError, DiceResult};

/// Delimiters tried in order when splitting the input.
const SPLIT_ON: [char; 4] = ['|', '\\', '/', ','];

/// Delimiters tried in order when echoing the options back.
const JOIN_WITH: [char; 4] = [',', '|', '/', '\\'];

/// A random pick among the given options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Options in the order given.
    pub options: Vec<String>,
    /// The chosen option.
    pub pick: String,
    delimiter: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Your options: {}. My choice: {}",
            self.options.join(&self.delimiter),
            self.pick
        )
    }
}

/// Split `input` on the first delimiter that yields several options and pick one.
pub fn choose(input: &str, rng: &mut StdRng) -> DiceResult<Choice> {
    let options = split_options(input);
    if options.is_empty() {
        return Err(DiceError::NoChoices);
    }
    let pick = options[rng.random_range(0..options.len())].clone();

    let delimiter = JOIN_WITH
        .iter()
        .find(|d| !input.contains(**d))
        .map_or_else(|| ", ".to_string(), |d| format!("{d} "));

    Ok(Choice {
        options,
        pick,
        delimiter,
    })
}

fn split_options(input: &str) -> Vec<String> {
    let collect = |delim: char| -> Vec<String> {
        input
            .split(delim)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };
    for delim in SPLIT_ON {
        let options = collect(delim);
        if options.len() > 1 {
            return options;
        }
    }
    collect(',')
}
