//! Race runner.
//!
//! Checks that an event can be raced, notifies its spectators, runs the
//! assignment optimizer and returns the verified result.

use std::sync::Arc;

use tracing::{info, warn};

use super::optimizer::{verify, AssignmentOptimizer};
use crate::config::{NotificationConfig, RaceConfig};
use crate::error::{RaceError, Result};
use crate::models::{RaceEvent, RaceResult};
use crate::store::{LogNotifier, SpectatorNotifier};
use crate::validation::validate_event;

/// Starts races.
///
/// # Example
///
/// ```
/// use u_race::models::{Competitor, RaceEvent};
/// use u_race::scheduler::RaceRunner;
///
/// let mut event = RaceEvent::new(1, "Pond Cup");
/// event.add_lane(10.0).unwrap();
/// event.add_participant(Competitor::swimmer(1, 5.0, 1.0)).unwrap();
///
/// let result = RaceRunner::new().start(&event).unwrap();
/// assert_eq!(result.competitor_ids(), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct RaceRunner {
    optimizer: AssignmentOptimizer,
    notification: NotificationConfig,
    notifier: Arc<dyn SpectatorNotifier>,
}

impl RaceRunner {
    /// Creates a runner with default settings that logs notifications.
    pub fn new() -> Self {
        Self::from_config(&RaceConfig::default())
    }

    /// Creates a runner from configuration.
    pub fn from_config(config: &RaceConfig) -> Self {
        Self {
            optimizer: AssignmentOptimizer::with_config(config.optimizer),
            notification: config.notification.clone(),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Sets the spectator notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn SpectatorNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The optimizer used by this runner.
    pub fn optimizer(&self) -> &AssignmentOptimizer {
        &self.optimizer
    }

    /// Starts a race and returns the lane assignment.
    ///
    /// Spectators are notified before the optimizer runs. When a check
    /// fails, nobody is notified and the optimizer is not invoked.
    ///
    /// # Errors
    /// - `NotEnoughLanes` if the event has no lanes.
    /// - `NotEnoughParticipants` if there are more lanes than participants.
    /// - `InvalidEvent` if the event fails [`validate_event`].
    /// - `Internal` if the optimizer result breaks its guarantees.
    pub fn start(&self, event: &RaceEvent) -> Result<RaceResult> {
        let lanes = event.lanes();
        let participants = event.participants();

        if lanes.is_empty() {
            return Err(RaceError::NotEnoughLanes);
        }
        if lanes.len() > participants.len() {
            return Err(RaceError::NotEnoughParticipants {
                lanes: lanes.len(),
                participants: participants.len(),
            });
        }
        if let Err(errors) = validate_event(event) {
            warn!(event = event.id(), issues = errors.len(), "race event failed validation");
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(RaceError::InvalidEvent(messages.join("; ")));
        }

        info!(
            event = event.id(),
            name = event.name(),
            lanes = lanes.len(),
            participants = participants.len(),
            "race started"
        );

        let message = self.notification.render(event.name());
        for &spectator in event.spectators() {
            self.notifier.notify(event, spectator, &message);
        }

        let result = self.optimizer.optimize(participants, lanes)?;
        verify(&result, lanes)?;

        info!(event = event.id(), makespan = result.makespan, "race finished");
        Ok(result)
    }
}

impl Default for RaceRunner {
    fn default() -> Self {
        Self::new()
    }
}
