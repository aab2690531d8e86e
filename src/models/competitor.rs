//! Competitor (duck) model.
//!
//! Ducks are users that may take part in races. Their racing capability is
//! a value of [`DuckKind`], checked directly instead of by type.

use serde::{Deserialize, Serialize};

use super::lane::is_positive;
use super::UserId;

/// A duck that may be registered as a race participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    /// User identifier.
    pub id: UserId,
    /// Display name (username).
    pub name: String,
    /// Movement capabilities.
    pub kind: DuckKind,
    /// Swimming speed (distance per time unit).
    pub speed: f64,
    /// Endurance; longer lanes require at least as much as shorter ones.
    pub resistance: f64,
}

/// Movement capabilities of a duck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuckKind {
    /// Can only fly.
    Flying,
    /// Can only swim.
    Swimming,
    /// Can both fly and swim.
    FlyingAndSwimming,
}

impl DuckKind {
    /// Whether this kind can swim (and therefore race).
    pub fn can_swim(self) -> bool {
        matches!(self, Self::Swimming | Self::FlyingAndSwimming)
    }

    /// Whether this kind can fly.
    pub fn can_fly(self) -> bool {
        matches!(self, Self::Flying | Self::FlyingAndSwimming)
    }
}

impl Competitor {
    /// Creates a new competitor.
    pub fn new(id: UserId, kind: DuckKind, speed: f64, resistance: f64) -> Self {
        Self {
            id,
            name: String::new(),
            kind,
            speed,
            resistance,
        }
    }

    /// Creates a swimming duck.
    pub fn swimmer(id: UserId, speed: f64, resistance: f64) -> Self {
        Self::new(id, DuckKind::Swimming, speed, resistance)
    }

    /// Creates a flying duck.
    pub fn flyer(id: UserId, speed: f64, resistance: f64) -> Self {
        Self::new(id, DuckKind::Flying, speed, resistance)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether this duck may take part in a race.
    #[inline]
    pub fn can_race(&self) -> bool {
        self.kind.can_swim()
    }

    /// Returns the first attribute that is not a positive finite number.
    pub fn invalid_attribute(&self) -> Option<(&'static str, f64)> {
        if !is_positive(self.speed) {
            Some(("speed", self.speed))
        } else if !is_positive(self.resistance) {
            Some(("resistance", self.resistance))
        } else {
            None
        }
    }
}
