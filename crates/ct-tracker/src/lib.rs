//! Initiative tracking core for tabletop combat scenes.
//!
//! A [`Scene`] ranks its [`Actor`]s by initiative using an
//! [`InitiativeIndex`], advances rounds and ticks, and holds an
//! [`OverrideQueue`] of actors who jumped ahead of the current tick before
//! acting. A [`SceneRegistry`] keeps at most one live scene per session key.

pub mod actor;
pub mod error;
pub mod index;
pub mod queue;
pub mod registry;
pub mod scene;

pub use actor::Actor;
pub use error::{ErrorKind, TrackerError, TrackerResult};
pub use index::InitiativeIndex;
pub use queue::OverrideQueue;
pub use registry::{SceneHandle, SceneRegistry, lock_scene};
pub use scene::{Scene, SceneState};
