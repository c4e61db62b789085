//! A pouch of identical dice and its rolled results.

use std::collections::BTreeMap;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

/// Most dice a single pouch may hold.
pub const MAX_DICE: u32 = 1000;

/// Rolled dice of one type, grouped by face.
///
/// Kept and dropped results are tallied separately; only kept dice count
/// toward the sum. Faces are stored in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePouch {
    count: u32,
    sides: u32,
    addition: i64,
    dice: BTreeMap<u32, u32>,
    dropped: BTreeMap<u32, u32>,
}

impl DicePouch {
    /// Roll `count` dice with `sides` faces, plus a flat `addition`.
    pub fn roll(count: u32, sides: u32, addition: i64, rng: &mut StdRng) -> DiceResult<Self> {
        validate(u64::from(count), u64::from(sides))?;
        let mut pouch = Self {
            count,
            sides,
            addition,
            dice: BTreeMap::new(),
            dropped: BTreeMap::new(),
        };
        pouch.roll_all(rng);
        Ok(pouch)
    }

    /// Build a pouch from faces that were already rolled.
    ///
    /// The same limits as [`roll`](Self::roll) apply.
    pub fn from_faces(sides: u32, addition: i64, faces: &[u32]) -> DiceResult<Self> {
        let requested = u64::try_from(faces.len()).unwrap_or(u64::MAX);
        validate(requested, u64::from(sides))?;
        let mut dice = BTreeMap::new();
        for &face in faces {
            *dice.entry(face).or_insert(0) += 1;
        }
        Ok(Self {
            count: u32::try_from(faces.len()).unwrap_or(MAX_DICE),
            sides,
            addition,
            dice,
            dropped: BTreeMap::new(),
        })
    }

    /// Roll every die again, discarding previous and dropped results.
    pub fn roll_all(&mut self, rng: &mut StdRng) {
        self.dice.clear();
        self.dropped.clear();
        for _ in 0..self.count {
            let face = rng.random_range(1..=self.sides);
            *self.dice.entry(face).or_insert(0) += 1;
        }
    }

    /// Roll `n` more dice and keep them.
    ///
    /// Fails without rolling anything if the kept dice would exceed
    /// [`MAX_DICE`].
    pub fn add_dice(&mut self, n: u32, rng: &mut StdRng) -> DiceResult<()> {
        self.check_room(n)?;
        for _ in 0..n {
            let face = rng.random_range(1..=self.sides);
            *self.dice.entry(face).or_insert(0) += 1;
        }
        self.count += n;
        Ok(())
    }

    /// Drop the `n` lowest kept dice. Returns how many were dropped.
    pub fn drop_lowest(&mut self, n: u32) -> u32 {
        let mut remaining = n;
        let kept: Vec<(u32, u32)> = self.dice.iter().map(|(f, t)| (*f, *t)).collect();
        for (face, times) in kept {
            if remaining == 0 {
                break;
            }
            let take = times.min(remaining);
            self.move_to_dropped(face, take);
            remaining -= take;
        }
        n - remaining
    }

    /// Reroll kept dice showing `face`.
    ///
    /// At most `max` dice are rerolled; `0` rerolls all of them. Unless
    /// `keep_results` is set, the old results move to the dropped tally.
    /// Returns how many dice were rolled.
    pub fn reroll(
        &mut self,
        face: u32,
        max: u32,
        keep_results: bool,
        rng: &mut StdRng,
    ) -> DiceResult<u32> {
        let showing = self.dice.get(&face).copied().unwrap_or(0);
        if showing == 0 {
            return Err(DiceError::NoFaceToReroll(face));
        }
        let n = if max == 0 { showing } else { max.min(showing) };
        if keep_results {
            self.check_room(n)?;
        } else {
            self.move_to_dropped(face, n);
        }
        for _ in 0..n {
            let rolled = rng.random_range(1..=self.sides);
            *self.dice.entry(rolled).or_insert(0) += 1;
        }
        Ok(n)
    }

    /// Sum of kept dice plus the addition.
    pub fn sum(&self) -> i64 {
        self.dice
            .iter()
            .map(|(face, times)| i64::from(*face) * i64::from(*times))
            .sum::<i64>()
            + self.addition
    }

    /// Number of distinct faces across kept and dropped dice.
    ///
    /// Used to decide whether the compressed form stays short.
    pub fn face_count(&self) -> usize {
        self.dice.len() + self.dropped.len()
    }

    /// Number of kept dice.
    pub fn kept_len(&self) -> u32 {
        self.dice.values().sum()
    }

    /// Total number of dice in the pouch, kept and dropped.
    pub fn len(&self) -> u32 {
        self.dice.values().chain(self.dropped.values()).sum()
    }

    /// Returns true if the pouch holds no dice.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of faces on each die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// The flat addition.
    pub fn addition(&self) -> i64 {
        self.addition
    }

    /// Kept results as `(face, times)`, ascending by face.
    pub fn kept(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.dice.iter().map(|(f, t)| (*f, *t))
    }

    /// Dropped results as `(face, times)`, ascending by face.
    pub fn dropped(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.dropped.iter().map(|(f, t)| (*f, *t))
    }

    /// Whether any kept die shows `face`.
    pub fn shows(&self, face: u32) -> bool {
        self.dice.contains_key(&face)
    }

    /// Every die written out: `(2+2+2[+1+1])+1`.
    pub fn simple_string(&self) -> String {
        self.render(|face, times| vec![face.to_string(); times as usize].join("+"))
    }

    /// Dice grouped by face: `(3x2[+2x1])+1`.
    pub fn compressed_string(&self) -> String {
        self.render(|face, times| format!("{times}x{face}"))
    }

    /// The shortest readable form: every die for up to ten dice, grouped
    /// faces for up to ten distinct faces, otherwise `(...)`.
    pub fn pretty_string(&self) -> String {
        if self.len() <= 10 {
            self.simple_string()
        } else if self.face_count() <= 10 {
            self.compressed_string()
        } else {
            "(...)".to_string()
        }
    }

    fn render(&self, group: impl Fn(u32, u32) -> String) -> String {
        let join = |map: &BTreeMap<u32, u32>| {
            map.iter()
                .map(|(face, times)| group(*face, *times))
                .collect::<Vec<_>>()
                .join("+")
        };
        let mut out = format!("({}", join(&self.dice));
        if !self.dropped.is_empty() {
            out.push_str(&format!("[+{}]", join(&self.dropped)));
        }
        out.push(')');
        if self.addition != 0 {
            out.push_str(&format!("{:+}", self.addition));
        }
        out
    }

    fn check_room(&self, n: u32) -> DiceResult<()> {
        validate(
            u64::from(self.kept_len()) + u64::from(n),
            u64::from(self.sides),
        )
    }

    fn move_to_dropped(&mut self, face: u32, n: u32) {
        if let Some(times) = self.dice.get_mut(&face) {
            *times -= n;
            if *times == 0 {
                self.dice.remove(&face);
            }
        }
        *self.dropped.entry(face).or_insert(0) += n;
    }
}

/// Check a requested roll against the pouch limits.
pub(crate) fn validate(count: u64, sides: u64) -> DiceResult<()> {
    if sides == 0 {
        return Err(DiceError::InvalidSides(sides));
    }
    if count > u64::from(MAX_DICE) {
        return Err(DiceError::TooManyDice {
            requested: count,
            max: MAX_DICE,
        });
    }
    Ok(())
}
