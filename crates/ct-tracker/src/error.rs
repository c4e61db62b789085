//! Error types for the initiative tracker.

use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors that can occur while manipulating scenes and their actors.
///
/// Every variant is a recoverable, user-facing condition. A failed operation
/// never leaves a scene partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// An actor with this name is already in the scene.
    #[error("{0} is already in the scene")]
    DuplicateActor(String),

    /// No actor with this name is in the scene.
    #[error("no actor named {0} in the scene")]
    UnknownActor(String),

    /// An initiative steal named the same actor on both sides.
    #[error("an actor cannot steal initiative from itself")]
    SameActor(String),

    /// The scene has no actors to schedule.
    #[error("the scene has no actors")]
    NoActors,

    /// Overriding actions are still queued and block the requested step.
    #[error("overriding actions must resolve first: {}", .0.join(", "))]
    PendingOverrides(Vec<String>),

    /// A scene is already running under this session key.
    #[error("a scene is already running in {0}")]
    SessionExists(String),

    /// No scene is running under this session key.
    #[error("no scene is running in {0}")]
    NoSession(String),

    /// An initiative value was malformed or out of range.
    #[error("invalid initiative value: {0}")]
    InvalidInitiative(String),

    /// An actor name was empty.
    #[error("actor names must not be empty")]
    InvalidActorName,

    /// The operation needs a running round.
    #[error("no round has started yet")]
    RoundNotStarted,
}

/// Machine-checkable kind of a [`TrackerError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TrackerError::DuplicateActor`].
    DuplicateActor,
    /// See [`TrackerError::UnknownActor`].
    UnknownActor,
    /// See [`TrackerError::SameActor`].
    SameActor,
    /// See [`TrackerError::NoActors`].
    NoActors,
    /// See [`TrackerError::PendingOverrides`].
    PendingOverrides,
    /// See [`TrackerError::SessionExists`].
    SessionExists,
    /// See [`TrackerError::NoSession`].
    NoSession,
    /// See [`TrackerError::InvalidInitiative`].
    InvalidInitiative,
    /// See [`TrackerError::InvalidActorName`].
    InvalidActorName,
    /// See [`TrackerError::RoundNotStarted`].
    RoundNotStarted,
}

impl TrackerError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateActor(_) => ErrorKind::DuplicateActor,
            Self::UnknownActor(_) => ErrorKind::UnknownActor,
            Self::SameActor(_) => ErrorKind::SameActor,
            Self::NoActors => ErrorKind::NoActors,
            Self::PendingOverrides(_) => ErrorKind::PendingOverrides,
            Self::SessionExists(_) => ErrorKind::SessionExists,
            Self::NoSession(_) => ErrorKind::NoSession,
            Self::InvalidInitiative(_) => ErrorKind::InvalidInitiative,
            Self::InvalidActorName => ErrorKind::InvalidActorName,
            Self::RoundNotStarted => ErrorKind::RoundNotStarted,
        }
    }
}
