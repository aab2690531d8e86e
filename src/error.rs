//! Error types for race configuration and execution.
//!
//! Every failure is a deterministic input-validation outcome, so nothing here
//! is retried. Errors are returned to the immediate caller; presentation is
//! the caller's concern.

use thiserror::Error;

use crate::models::{EventId, UserId};

/// Errors produced by race configuration, the runner and the service layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RaceError {
    /// A new lane is not longer than the current last lane.
    #[error("lane distance {distance} must be greater than the previous lane distance {last}")]
    OrderingViolation {
        /// Rejected distance.
        distance: f64,
        /// Distance of the current last lane.
        last: f64,
    },

    /// Lane distance is zero, negative, or not finite.
    #[error("lane distance must be a positive number, got {0}")]
    InvalidDistance(f64),

    /// Every lane identifier after the largest one in use is taken.
    #[error("no lane identifiers left in this event")]
    LaneIdsExhausted,

    /// Lane removal requested on an event without lanes.
    #[error("there are no lanes to remove")]
    NoLanes,

    /// 1-based lane index outside `[1, count]`.
    #[error("invalid lane index {index}, expected 1..={count}")]
    IndexOutOfRange {
        /// Requested 1-based index.
        index: usize,
        /// Current lane count.
        count: usize,
    },

    /// The competitor cannot swim.
    #[error("duck {0} is not compatible with race events")]
    CapabilityMismatch(UserId),

    /// Speed or resistance is not a positive number.
    #[error("duck {id} has an invalid {attribute}: {value}")]
    InvalidCompetitor {
        /// Competitor id.
        id: UserId,
        /// Offending attribute name.
        attribute: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The competitor is already registered as a participant.
    #[error("user {0} is already a participant in this race")]
    AlreadyParticipant(UserId),

    /// The user is already a spectator of the event.
    #[error("user {0} is already a spectator of this event")]
    AlreadySpectator(UserId),

    /// The competitor is not a participant of the event.
    #[error("duck {0} is not a participant in this event")]
    NotAParticipant(UserId),

    /// The user is not a spectator of the event.
    #[error("user {0} is not a spectator of this event")]
    NotASpectator(UserId),

    /// The event has no lanes.
    #[error("the race can't start because it has no lanes")]
    NotEnoughLanes,

    /// There are more lanes than participants.
    #[error("the race can't start: {lanes} lanes but only {participants} participants")]
    NotEnoughParticipants {
        /// Lane count.
        lanes: usize,
        /// Participant count.
        participants: usize,
    },

    /// Whole-event validation failed before the race started.
    #[error("invalid race event: {0}")]
    InvalidEvent(String),

    /// No event with the given id.
    #[error("event {0} was not found")]
    EventNotFound(EventId),

    /// No user with the given id.
    #[error("user {0} was not found")]
    UserNotFound(UserId),

    /// The user exists but is not a duck.
    #[error("user {0} is not a duck")]
    NotADuck(UserId),

    /// An event with the same name already exists.
    #[error("an event named '{0}' already exists")]
    EventAlreadyExists(String),

    /// Event name is blank.
    #[error("event name cannot be empty")]
    InvalidEventName,

    /// A programming invariant was violated (should not occur).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for race operations.
pub type Result<T> = std::result::Result<T, RaceError>;
