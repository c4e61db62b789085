//! Rank-bucketed initiative index.
//!
//! Actors are owned by name and grouped into buckets keyed by initiative.
//! Buckets live in a `BTreeMap`, so priority order never depends on hash
//! iteration, and each bucket keeps insertion order as the tie-break.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::actor::Actor;
use crate::error::{TrackerError, TrackerResult};

/// Multi-map from initiative value to the ordered bucket of actors at that value.
///
/// Invariants:
/// - every actor sits in exactly one bucket, the one keyed by its initiative;
/// - no bucket is ever empty.
#[derive(Debug, Clone, Default)]
pub struct InitiativeIndex {
    actors: HashMap<String, Actor>,
    buckets: BTreeMap<i32, Vec<String>>,
}

impl InitiativeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an actor at the end of the bucket for its initiative.
    pub fn add(&mut self, actor: Actor) -> TrackerResult<()> {
        if self.actors.contains_key(actor.name()) {
            return Err(TrackerError::DuplicateActor(actor.name().to_string()));
        }
        self.buckets
            .entry(actor.initiative())
            .or_default()
            .push(actor.name().to_string());
        debug!(
            actor = actor.name(),
            initiative = actor.initiative(),
            "actor indexed"
        );
        self.actors.insert(actor.name().to_string(), actor);
        Ok(())
    }

    /// Remove an actor by name, returning it.
    pub fn remove(&mut self, name: &str) -> TrackerResult<Actor> {
        let actor = self
            .actors
            .remove(name)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))?;
        self.detach(name, actor.initiative());
        debug!(actor = name, "actor unindexed");
        Ok(actor)
    }

    /// Move an actor to a new initiative value.
    ///
    /// The actor is placed last in the destination bucket, even when the
    /// value does not change.
    pub fn move_to(&mut self, name: &str, initiative: i32) -> TrackerResult<&Actor> {
        let old = self
            .actors
            .get(name)
            .map(Actor::initiative)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))?;

        self.detach(name, old);
        self.buckets
            .entry(initiative)
            .or_default()
            .push(name.to_string());

        let actor = self
            .actors
            .get_mut(name)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))?;
        actor.set_initiative(initiative);
        debug!(actor = name, from = old, to = initiative, "actor moved");
        Ok(actor)
    }

    /// Distinct populated initiative values, sorted.
    pub fn ordered_priorities(&self, descending: bool) -> Vec<i32> {
        if descending {
            self.buckets.keys().rev().copied().collect()
        } else {
            self.buckets.keys().copied().collect()
        }
    }

    /// Names in the bucket for `initiative`, in insertion order.
    pub fn bucket(&self, initiative: i32) -> &[String] {
        self.buckets
            .get(&initiative)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The highest populated initiative value.
    pub fn highest_priority(&self) -> Option<i32> {
        self.buckets.keys().next_back().copied()
    }

    /// The highest populated initiative value strictly below `initiative`.
    pub fn next_priority_below(&self, initiative: i32) -> Option<i32> {
        self.buckets
            .range(..initiative)
            .next_back()
            .map(|(key, _)| *key)
    }

    /// Actors in acting order: descending initiative, insertion order within a bucket.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.buckets
            .values()
            .rev()
            .flat_map(move |names| names.iter().filter_map(move |n| self.actors.get(n)))
    }

    /// Look up an actor by name.
    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    /// Mutable lookup. Initiative changes must go through [`move_to`](Self::move_to).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors.get_mut(name)
    }

    /// Whether an actor with this name is indexed.
    pub fn contains(&self, name: &str) -> bool {
        self.actors.contains_key(name)
    }

    /// Number of indexed actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns true if no actors are indexed.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub(crate) fn actors_mut(&mut self) -> impl Iterator<Item = &mut Actor> + '_ {
        self.actors.values_mut()
    }

    fn detach(&mut self, name: &str, initiative: i32) {
        if let Some(bucket) = self.buckets.get_mut(&initiative) {
            bucket.retain(|n| n != name);
            if bucket.is_empty() {
                self.buckets.remove(&initiative);
            }
        }
    }
}
