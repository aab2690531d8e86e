//! Input validation for race events.
//!
//! Configuration operations keep a [`RaceEvent`] consistent, but events can
//! also arrive deserialized from an external store. This module checks the
//! structural integrity of a whole event before it is raced. Detects:
//! - Invalid or non-increasing lane distances
//! - Duplicate lane ids and a lane counter that would hand out a used id
//! - Participants that cannot swim or have invalid attributes
//! - Duplicate participants and spectators

use crate::models::RaceEvent;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A lane distance is not a positive finite number.
    InvalidDistance,
    /// A lane is not longer than the lane before it.
    NonIncreasingLanes,
    /// Two lanes share an ID, or the lane counter is not past every lane ID.
    LaneIdConflict,
    /// A participant cannot swim.
    IneligibleParticipant,
    /// A participant's speed or resistance is not a positive finite number.
    InvalidAttribute,
    /// Two participants share the same ID.
    DuplicateParticipant,
    /// A spectator is subscribed twice.
    DuplicateSpectator,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a race event.
///
/// Checks:
/// 1. Every lane distance is positive and finite
/// 2. Lane distances are strictly increasing
/// 3. Lane IDs are unique and below the next lane ID
/// 4. Every participant can swim
/// 5. Every participant has positive finite speed and resistance
/// 6. No duplicate participant IDs
/// 7. No duplicate spectator IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_event(event: &RaceEvent) -> ValidationResult {
    let mut errors = Vec::new();

    for lane in event.lanes() {
        if !lane.has_valid_distance() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDistance,
                format!("Lane {} has invalid distance {}", lane.id, lane.distance),
            ));
        }
    }

    for pair in event.lanes().windows(2) {
        if pair[1].distance <= pair[0].distance {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonIncreasingLanes,
                format!(
                    "Lane {} ({}) is not longer than lane {} ({})",
                    pair[1].id, pair[1].distance, pair[0].id, pair[0].distance
                ),
            ));
        }
    }

    let mut lane_ids = HashSet::new();
    for lane in event.lanes() {
        if !lane_ids.insert(lane.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::LaneIdConflict,
                format!("Duplicate lane ID: {}", lane.id),
            ));
        }
    }
    if let Some(max) = lane_ids.iter().max() {
        if event.next_lane_id() <= *max {
            errors.push(ValidationError::new(
                ValidationErrorKind::LaneIdConflict,
                format!(
                    "Next lane ID {} is not greater than lane ID {max}",
                    event.next_lane_id()
                ),
            ));
        }
    }

    let mut participant_ids = HashSet::new();
    for duck in event.participants() {
        if !participant_ids.insert(duck.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateParticipant,
                format!("Duplicate participant ID: {}", duck.id),
            ));
        }

        if !duck.can_race() {
            errors.push(ValidationError::new(
                ValidationErrorKind::IneligibleParticipant,
                format!("Duck {} cannot swim", duck.id),
            ));
        }

        if let Some((attribute, value)) = duck.invalid_attribute() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidAttribute,
                format!("Duck {} has invalid {attribute} {value}", duck.id),
            ));
        }
    }

    let mut spectator_ids = HashSet::new();
    for &user in event.spectators() {
        if !spectator_ids.insert(user) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSpectator,
                format!("Duplicate spectator ID: {user}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
