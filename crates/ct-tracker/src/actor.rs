//! Actors: the participants that take turns within a scene.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// An entity that takes actions within a scene.
///
/// Identity is the name alone: two actors with the same name compare equal
/// regardless of initiative or notes. Initiative and the acted flag are only
/// changed by the owning [`Scene`](crate::Scene) so that its priority buckets
/// stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    name: String,
    initiative: i32,
    has_acted: bool,
    notes: Option<String>,
}

impl Actor {
    /// Create an actor that has not acted yet and has no notes.
    pub fn new(name: impl Into<String>, initiative: i32) -> Self {
        Self {
            name: name.into(),
            initiative,
            has_acted: false,
            notes: None,
        }
    }

    /// Attach notes (builder style). Blank notes are treated as none.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.set_notes(notes);
        self
    }

    /// Set whether the actor starts out as having acted (builder style).
    pub fn with_acted(mut self, has_acted: bool) -> Self {
        self.has_acted = has_acted;
        self
    }

    /// The actor's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current initiative value.
    pub fn initiative(&self) -> i32 {
        self.initiative
    }

    /// Whether the actor has acted this round.
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    /// Free-text notes, if any.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Replace the notes. Blank text clears them.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
    }

    pub(crate) fn set_initiative(&mut self, initiative: i32) {
        self.initiative = initiative;
    }

    pub(crate) fn set_acted(&mut self, has_acted: bool) {
        self.has_acted = has_acted;
    }

    /// Short form: `Lee: 3`.
    pub fn init_line(&self) -> String {
        format!("{}: {}", self.name, self.initiative)
    }

    /// Verbose form: `Lee status - Init: 3 - Acted: no - Notes: Singer`.
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "{} status - Init: {} - Acted: {}",
            self.name,
            self.initiative,
            if self.has_acted { "yes" } else { "no" }
        );
        if let Some(notes) = &self.notes {
            line.push_str(&format!(" - Notes: {notes}"));
        }
        line
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.initiative)
    }
}
