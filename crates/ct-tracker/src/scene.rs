//! Scene state machine.
//!
//! A scene moves from `Empty` to `Idle` once actors join, and to `InRound`
//! when the first round starts. Within a round the tick walks down the
//! populated initiative values, highest first. Actors who are raised above
//! the tick before acting are queued as overriding actions, and the queue
//! must be resolved before the next round can begin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actor::Actor;
use crate::error::{TrackerError, TrackerResult};
use crate::index::InitiativeIndex;
use crate::queue::OverrideQueue;

/// Lifecycle state of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneState {
    /// No actors.
    Empty,
    /// Actors present, no round started yet.
    Idle,
    /// At least one round has started.
    InRound,
}

impl std::fmt::Display for SceneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Idle => write!(f, "Idle"),
            Self::InRound => write!(f, "In Round"),
        }
    }
}

/// An action scene whose actors act in initiative order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    name: String,
    round: u32,
    tick: i32,
    index: InitiativeIndex,
    overrides: OverrideQueue,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The scene label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current round number (0 before the first round).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The initiative value currently acting (0 before the first round).
    pub fn tick(&self) -> i32 {
        self.tick
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SceneState {
        if self.index.is_empty() {
            SceneState::Empty
        } else if self.round == 0 {
            SceneState::Idle
        } else {
            SceneState::InRound
        }
    }

    /// Look up an actor by name.
    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.index.get(name)
    }

    /// Mutable access to an actor's notes.
    pub fn actor_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.index.get_mut(name)
    }

    /// Number of actors in the scene.
    pub fn actor_count(&self) -> usize {
        self.index.len()
    }

    /// Actors in acting order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.index.iter_ordered()
    }

    /// The initiative index (read-only).
    pub fn index(&self) -> &InitiativeIndex {
        &self.index
    }

    /// Names queued as overriding actions, in order.
    pub fn pending_overrides(&self) -> Vec<String> {
        self.overrides.iter().map(str::to_string).collect()
    }

    /// Whether an actor is queued as an overriding action.
    pub fn is_pending(&self, name: &str) -> bool {
        self.overrides.contains(name)
    }

    /// Add an actor to the scene. Does not affect round or tick.
    pub fn add_actor(&mut self, actor: Actor) -> TrackerResult<()> {
        if actor.name().trim().is_empty() {
            return Err(TrackerError::InvalidActorName);
        }
        self.index.add(actor)
    }

    /// Remove an actor by name, also dropping any queued override for it.
    ///
    /// The tick is left where it is even if its bucket empties; the next
    /// [`advance_tick`](Self::advance_tick) or
    /// [`advance_round`](Self::advance_round) moves on from it.
    pub fn remove_actor(&mut self, name: &str) -> TrackerResult<Actor> {
        let actor = self.index.remove(name)?;
        if self.overrides.remove(name) {
            debug!(scene = %self.name, actor = name, "queued override dropped");
        }
        Ok(actor)
    }

    /// Start the next round.
    ///
    /// Resets every actor's acted flag and sets the tick to the highest
    /// populated initiative. Fails without changing anything when the scene
    /// is empty or overriding actions are still queued.
    pub fn advance_round(&mut self) -> TrackerResult<u32> {
        let Some(highest) = self.index.highest_priority() else {
            return Err(TrackerError::NoActors);
        };
        self.ensure_no_overrides()?;

        self.round += 1;
        self.tick = highest;
        for actor in self.index.actors_mut() {
            actor.set_acted(false);
        }
        debug!(scene = %self.name, round = self.round, tick = self.tick, "round started");
        Ok(self.round)
    }

    /// Finish the current tick and move to the next lower initiative.
    ///
    /// Every actor at the current tick is marked as acted. Returns the new
    /// tick, or `None` when no lower initiative is populated and the round
    /// is over.
    pub fn advance_tick(&mut self) -> TrackerResult<Option<i32>> {
        self.ensure_in_round()?;
        self.ensure_no_overrides()?;

        let acting: Vec<String> = self.index.bucket(self.tick).to_vec();
        for name in &acting {
            if let Some(actor) = self.index.get_mut(name) {
                actor.set_acted(true);
            }
        }

        match self.index.next_priority_below(self.tick) {
            Some(next) => {
                self.tick = next;
                debug!(scene = %self.name, tick = next, "tick advanced");
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    /// Set an actor's initiative.
    ///
    /// While a round is running, an actor raised above the current tick who
    /// has not acted yet is queued as an overriding action. Lowering an
    /// actor never queues or dequeues it.
    pub fn set_initiative(&mut self, name: &str, initiative: i32) -> TrackerResult<&Actor> {
        let has_acted = self
            .index
            .get(name)
            .map(Actor::has_acted)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))?;
        let overrides = self.round > 0 && initiative > self.tick && !has_acted;

        self.index.move_to(name, initiative)?;
        if overrides && self.overrides.enqueue(name) {
            debug!(scene = %self.name, actor = name, "override queued");
        }
        self.actor_ref(name)
    }

    /// Shift an actor's initiative by `delta`.
    pub fn add_initiative(&mut self, name: &str, delta: i32) -> TrackerResult<&Actor> {
        let current = self
            .index
            .get(name)
            .map(Actor::initiative)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))?;
        let target = checked_shift(current, delta)?;
        self.set_initiative(name, target)
    }

    /// Move `amount` initiative from `to` to `from`.
    ///
    /// Both actors are validated before either changes. Returns the updated
    /// `(from, to)` pair.
    pub fn steal_initiative(
        &mut self,
        from: &str,
        to: &str,
        amount: i32,
    ) -> TrackerResult<(Actor, Actor)> {
        if from == to {
            return Err(TrackerError::SameActor(from.to_string()));
        }
        let from_init = self.actor_ref(from)?.initiative();
        let to_init = self.actor_ref(to)?.initiative();
        let loss = amount
            .checked_neg()
            .ok_or_else(|| TrackerError::InvalidInitiative(amount.to_string()))?;
        let from_target = checked_shift(from_init, amount)?;
        let to_target = checked_shift(to_init, loss)?;

        let gainer = self.set_initiative(from, from_target)?.clone();
        let loser = self.set_initiative(to, to_target)?.clone();
        Ok((gainer, loser))
    }

    /// Mark an actor as having acted this round.
    ///
    /// A queued override for the actor counts as resolved.
    pub fn mark_acted(&mut self, name: &str) -> TrackerResult<&Actor> {
        self.ensure_in_round()?;
        let actor = self
            .index
            .get_mut(name)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))?;
        actor.set_acted(true);
        self.overrides.remove(name);
        self.actor_ref(name)
    }

    /// Let every queued overriding actor act, in queue order.
    pub fn resolve_overrides(&mut self) -> TrackerResult<Vec<String>> {
        self.ensure_in_round()?;
        let resolved = self.overrides.drain();
        for name in &resolved {
            if let Some(actor) = self.index.get_mut(name) {
                actor.set_acted(true);
            }
        }
        if !resolved.is_empty() {
            debug!(scene = %self.name, count = resolved.len(), "overrides resolved");
        }
        Ok(resolved)
    }

    /// Render the initiative table.
    ///
    /// Lists every actor as `name: init` in descending initiative order, with
    /// `[Active]` on the bucket at the current tick. With `active_only`, only
    /// that bucket is listed.
    pub fn render_initiative_table(&self, active_only: bool) -> String {
        let mut out = self.header();
        for key in self.index.ordered_priorities(true) {
            let active = self.round > 0 && key == self.tick;
            if active_only && !active {
                continue;
            }
            for actor in self.index.bucket(key).iter().filter_map(|n| self.index.get(n)) {
                out.push('\n');
                out.push_str(&actor.init_line());
                if active {
                    out.push_str(" [Active]");
                }
            }
        }
        out
    }

    /// Render the verbose status line for one actor.
    pub fn render_actor_status(&self, name: &str) -> TrackerResult<String> {
        Ok(self.actor_ref(name)?.status_line())
    }

    /// Render the header followed by every actor's status line.
    pub fn render_all_status(&self) -> String {
        let mut out = self.header();
        for actor in self.index.iter_ordered() {
            out.push('\n');
            out.push_str(&actor.status_line());
        }
        out
    }

    fn header(&self) -> String {
        format!("[Round: {} - Tick: {}]", self.round, self.tick)
    }

    fn actor_ref(&self, name: &str) -> TrackerResult<&Actor> {
        self.index
            .get(name)
            .ok_or_else(|| TrackerError::UnknownActor(name.to_string()))
    }

    fn ensure_in_round(&self) -> TrackerResult<()> {
        if self.round == 0 {
            return Err(TrackerError::RoundNotStarted);
        }
        Ok(())
    }

    fn ensure_no_overrides(&self) -> TrackerResult<()> {
        if self.overrides.is_empty() {
            Ok(())
        } else {
            Err(TrackerError::PendingOverrides(self.pending_overrides()))
        }
    }
}

fn checked_shift(value: i32, delta: i32) -> TrackerResult<i32> {
    value
        .checked_add(delta)
        .ok_or_else(|| TrackerError::InvalidInitiative(format!("{value} + {delta}")))
}
