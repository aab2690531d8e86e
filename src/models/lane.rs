//! Lane model.

use serde::{Deserialize, Serialize};

use super::LaneId;

/// One leg of a race, raced by exactly one competitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Lane identifier, unique within its event.
    pub id: LaneId,
    /// Length of the lane.
    pub distance: f64,
}

impl Lane {
    /// Creates a new lane.
    pub fn new(id: LaneId, distance: f64) -> Self {
        Self { id, distance }
    }

    /// Round-trip time for a competitor swimming at `speed`.
    ///
    /// A duck swims the lane and back: `2 × distance / speed`.
    #[inline]
    pub fn round_trip_time(&self, speed: f64) -> f64 {
        2.0 * self.distance / speed
    }

    /// Whether the distance is a positive finite number.
    #[inline]
    pub fn has_valid_distance(&self) -> bool {
        is_positive(self.distance)
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
