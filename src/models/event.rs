//! Race event configuration.
//!
//! A race event owns an ordered lane list, its participants and its
//! spectators. Every mutation is validated on its own and a rejected call
//! leaves the event unchanged.
//!
//! # Invariants
//! - Lane distances are strictly increasing in insertion order.
//! - Lane ids are unique and never reused, even after removal.
//! - Participants can swim and have positive speed and resistance.
//! - No competitor is registered twice; no spectator is subscribed twice.
//! - A spectator cannot later register as a participant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lane::is_positive;
use super::{Competitor, EventId, Lane, LaneId, UserId};
use crate::error::{RaceError, Result};

/// A race event: ordered lanes, participants and spectators.
///
/// Participants keep their registration order. The optimizer decides the
/// racing order, but fully tied competitors are resolved by this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEvent {
    id: EventId,
    name: String,
    lanes: Vec<Lane>,
    participants: Vec<Competitor>,
    spectators: Vec<UserId>,
    next_lane_id: LaneId,
}

impl RaceEvent {
    /// Creates an empty race event.
    pub fn new(id: EventId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lanes: Vec::new(),
            participants: Vec::new(),
            spectators: Vec::new(),
            next_lane_id: 1,
        }
    }

    /// Event identifier.
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lanes in increasing distance order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Lane distances in lane order.
    pub fn lane_distances(&self) -> Vec<f64> {
        self.lanes.iter().map(|l| l.distance).collect()
    }

    /// Registered participants in registration order.
    pub fn participants(&self) -> &[Competitor] {
        &self.participants
    }

    /// Subscribed spectators in subscription order.
    pub fn spectators(&self) -> &[UserId] {
        &self.spectators
    }

    /// Whether `id` is a registered participant.
    pub fn is_participant(&self, id: UserId) -> bool {
        self.participants.iter().any(|c| c.id == id)
    }

    /// Whether `id` is a subscribed spectator.
    pub fn is_spectator(&self, id: UserId) -> bool {
        self.spectators.contains(&id)
    }

    /// Appends a lane longer than every existing lane.
    ///
    /// # Errors
    /// - `InvalidDistance` if `distance` is not a positive finite number.
    /// - `OrderingViolation` if `distance` is not greater than the last lane.
    pub fn add_lane(&mut self, distance: f64) -> Result<&Lane> {
        if !is_positive(distance) {
            return Err(RaceError::InvalidDistance(distance));
        }
        if let Some(last) = self.lanes.last() {
            if distance <= last.distance {
                return Err(RaceError::OrderingViolation {
                    distance,
                    last: last.distance,
                });
            }
        }

        let id = self.allocate_lane_id()?;
        self.next_lane_id = id.saturating_add(1);
        self.lanes.push(Lane::new(id, distance));
        debug!(event = self.id, lane = id, distance, "lane added");
        self.lanes
            .last()
            .ok_or_else(|| RaceError::Internal("lane list empty after push".into()))
    }

    /// Next lane id to hand out.
    pub fn next_lane_id(&self) -> LaneId {
        self.next_lane_id
    }

    // A stored counter may lag behind the lanes it was loaded with; ids are
    // never reused either way.
    fn allocate_lane_id(&self) -> Result<LaneId> {
        match self.lanes.iter().map(|l| l.id).max() {
            None => Ok(self.next_lane_id),
            Some(max) => max
                .checked_add(1)
                .map(|after| after.max(self.next_lane_id))
                .ok_or(RaceError::LaneIdsExhausted),
        }
    }

    /// Removes the lane at a 1-based `index`.
    ///
    /// Removing a lane never breaks the ordering of the remaining lanes.
    ///
    /// # Errors
    /// - `NoLanes` if the event has no lanes.
    /// - `IndexOutOfRange` if `index` is outside `[1, count]`.
    pub fn remove_lane(&mut self, index: usize) -> Result<Lane> {
        let count = self.lanes.len();
        if count == 0 {
            return Err(RaceError::NoLanes);
        }
        if index == 0 || index > count {
            return Err(RaceError::IndexOutOfRange { index, count });
        }

        let lane = self.lanes.remove(index - 1);
        debug!(event = self.id, lane = lane.id, "lane removed");
        Ok(lane)
    }

    /// Registers a competitor as a participant.
    ///
    /// # Errors
    /// - `CapabilityMismatch` if the duck cannot swim.
    /// - `InvalidCompetitor` if speed or resistance is not positive.
    /// - `AlreadySpectator` if the duck is a spectator of this event.
    /// - `AlreadyParticipant` if the duck is already registered.
    pub fn add_participant(&mut self, competitor: Competitor) -> Result<()> {
        check_eligible(&competitor)?;
        if self.is_spectator(competitor.id) {
            return Err(RaceError::AlreadySpectator(competitor.id));
        }
        if self.is_participant(competitor.id) {
            return Err(RaceError::AlreadyParticipant(competitor.id));
        }

        debug!(event = self.id, duck = competitor.id, "participant added");
        self.participants.push(competitor);
        Ok(())
    }

    /// Unregisters a participant and returns it.
    ///
    /// # Errors
    /// `NotAParticipant` if `id` is not registered.
    pub fn remove_participant(&mut self, id: UserId) -> Result<Competitor> {
        let pos = self
            .participants
            .iter()
            .position(|c| c.id == id)
            .ok_or(RaceError::NotAParticipant(id))?;
        debug!(event = self.id, duck = id, "participant removed");
        Ok(self.participants.remove(pos))
    }

    /// Replaces a participant's record with the duck's current one.
    ///
    /// Registration order is kept.
    ///
    /// # Errors
    /// - `CapabilityMismatch` if the duck can no longer swim.
    /// - `InvalidCompetitor` if speed or resistance is no longer positive.
    /// - `NotAParticipant` if the duck is not registered.
    pub fn update_participant(&mut self, competitor: Competitor) -> Result<()> {
        check_eligible(&competitor)?;
        let slot = self
            .participants
            .iter_mut()
            .find(|c| c.id == competitor.id)
            .ok_or(RaceError::NotAParticipant(competitor.id))?;
        *slot = competitor;
        Ok(())
    }

    /// Subscribes a user to race notifications.
    ///
    /// Participants may also watch; only the reverse direction is rejected.
    ///
    /// # Errors
    /// `AlreadySpectator` if the user is already subscribed.
    pub fn add_spectator(&mut self, id: UserId) -> Result<()> {
        if self.is_spectator(id) {
            return Err(RaceError::AlreadySpectator(id));
        }
        self.spectators.push(id);
        debug!(event = self.id, user = id, "spectator added");
        Ok(())
    }

    /// Unsubscribes a spectator.
    ///
    /// # Errors
    /// `NotASpectator` if the user is not subscribed.
    pub fn remove_spectator(&mut self, id: UserId) -> Result<()> {
        let pos = self
            .spectators
            .iter()
            .position(|&s| s == id)
            .ok_or(RaceError::NotASpectator(id))?;
        self.spectators.remove(pos);
        debug!(event = self.id, user = id, "spectator removed");
        Ok(())
    }
}

fn check_eligible(competitor: &Competitor) -> Result<()> {
    if !competitor.can_race() {
        return Err(RaceError::CapabilityMismatch(competitor.id));
    }
    match competitor.invalid_attribute() {
        Some((attribute, value)) => Err(RaceError::InvalidCompetitor {
            id: competitor.id,
            attribute,
            value,
        }),
        None => Ok(()),
    }
}
