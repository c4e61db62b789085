//! Storyteller-style success counting on pools of d10s.
//!
//! Each die at or above the target number scores one success, and each die
//! at or above the double threshold scores a second one. Bonus successes are
//! the pouch's addition. A roll with no net successes that shows a 1 is a
//! botch.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::pouch::DicePouch;

/// Faces on a storyteller die.
pub const STORYTELLER_SIDES: u32 = 10;

/// Options for a storyteller roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorytellerCheck {
    /// Dice at or above this value score a success.
    pub target: u32,
    /// Dice at or above this value score an extra success; `0` disables doubles.
    pub double: u32,
    /// Flat successes added to (or taken from) the result.
    pub bonus: i64,
    /// Reroll every die showing this face once, discarding the old result.
    pub reroll: Option<u32>,
    /// Every die at or above this value adds one more die, once.
    pub explode: Option<u32>,
}

impl Default for StorytellerCheck {
    fn default() -> Self {
        Self {
            target: 7,
            double: 10,
            bonus: 0,
            reroll: None,
            explode: None,
        }
    }
}

impl StorytellerCheck {
    /// Roll `count` d10s with this check's bonus, rerolls and explosions applied.
    ///
    /// Exploding dice count toward [`MAX_DICE`](crate::MAX_DICE); a pool
    /// that would explode past it is rejected.
    pub fn roll(&self, count: u32, rng: &mut StdRng) -> DiceResult<DicePouch> {
        let mut pouch = DicePouch::roll(count, STORYTELLER_SIDES, self.bonus, rng)?;
        if let Some(face) = self.reroll.filter(|face| pouch.shows(*face)) {
            pouch.reroll(face, 0, false, rng)?;
        }
        if let Some(threshold) = self.explode {
            let exploding: u32 = pouch
                .kept()
                .filter(|(face, _)| *face >= threshold)
                .map(|(_, times)| times)
                .sum();
            pouch.add_dice(exploding, rng)?;
        }
        Ok(pouch)
    }

    /// Count successes on an already rolled pouch.
    pub fn resolve(&self, pouch: &DicePouch) -> StorytellerOutcome {
        let mut successes = pouch.addition();
        for (face, times) in pouch.kept() {
            if face >= self.target {
                successes += i64::from(times);
                if self.double != 0 && face >= self.double {
                    successes += i64::from(times);
                }
            }
        }
        StorytellerOutcome {
            faces: pouch.kept().collect(),
            bonus: pouch.addition(),
            successes,
            botch: successes <= 0 && pouch.shows(1),
        }
    }
}

/// The counted result of a storyteller roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorytellerOutcome {
    /// Kept results as `(face, times)`, ascending by face.
    pub faces: Vec<(u32, u32)>,
    /// Flat bonus included in `successes`.
    pub bonus: i64,
    /// Net successes.
    pub successes: i64,
    /// No net successes and at least one 1 rolled.
    pub botch: bool,
}

impl std::fmt::Display for StorytellerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self
            .faces
            .iter()
            .map(|(face, times)| format!("{face}: {times}"))
            .collect();
        write!(f, "[{}]", faces.join(", "))?;
        if self.bonus > 0 {
            write!(f, " + {}", self.bonus)?;
        } else if self.bonus < 0 {
            write!(f, " - {}", self.bonus.unsigned_abs())?;
        }
        if self.botch {
            write!(f, " - BOTCH")
        } else if self.successes == 1 {
            write!(f, " - 1 Success")
        } else {
            write!(f, " - {} Successes", self.successes)
        }
    }
}

/// Parse `<count> [tN] [dN] [rN] [eN] [+N] [-N]` into a dice count and check.
pub fn parse_storyteller(args: &str) -> DiceResult<(u32, StorytellerCheck)> {
    let mut words = args.split_whitespace();
    let count_text = words.next().ok_or(DiceError::NoDice)?;
    let count: u32 = count_text.parse().map_err(|_| {
        DiceError::syntax(args, format!("'{count_text}' is not a number of dice"))
    })?;

    let mut check = StorytellerCheck::default();
    for word in words {
        let mut chars = word.chars();
        let Some(op) = chars.next() else {
            continue;
        };
        let value: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| DiceError::syntax(args, format!("'{word}' needs a number")))?;
        match op.to_ascii_lowercase() {
            't' => check.target = value,
            'd' => check.double = value,
            'r' => check.reroll = Some(value),
            'e' => check.explode = Some(value),
            '+' => check.bonus += i64::from(value),
            '-' => check.bonus -= i64::from(value),
            other => {
                return Err(DiceError::syntax(args, format!("unknown option '{other}'")));
            }
        }
    }
    Ok((count, check))
}
