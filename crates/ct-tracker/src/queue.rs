//! Queue of overriding actions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Actors who moved above the current tick before acting.
///
/// Ordered by enqueue time, each name at most once. A scene refuses to start
/// a new round until this queue has been drained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideQueue {
    order: Vec<String>,
    members: HashSet<String>,
}

impl OverrideQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a name unless it is already queued. Returns true if it was added.
    pub fn enqueue(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if !self.members.insert(name.clone()) {
            return false;
        }
        self.order.push(name);
        true
    }

    /// Take every queued name in order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<String> {
        self.members.clear();
        std::mem::take(&mut self.order)
    }

    /// Remove a single name. Returns true if it was queued.
    pub fn remove(&mut self, name: &str) -> bool {
        if !self.members.remove(name) {
            return false;
        }
        self.order.retain(|n| n != name);
        true
    }

    /// Whether a name is queued.
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Queued names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Number of queued names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
