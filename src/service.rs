//! Identifier-based race service.
//!
//! The entry point used by the surrounding application: every operation
//! takes an event id (and a user id or value), resolves it through the
//! [`EventStore`] and [`Directory`] collaborators and delegates to the
//! configuration operations or the [`RaceRunner`].

use tracing::info;

use crate::error::{RaceError, Result};
use crate::models::{Competitor, EventId, Lane, RaceEvent, RaceResult, UserId};
use crate::scheduler::RaceRunner;
use crate::store::{Directory, EventStore};

/// Race operations over an event store and a user directory.
///
/// # Example
///
/// ```
/// use u_race::models::Competitor;
/// use u_race::scheduler::RaceRunner;
/// use u_race::service::RaceService;
/// use u_race::store::{InMemoryDirectory, InMemoryEventStore};
///
/// let directory = InMemoryDirectory::new()
///     .with_duck(Competitor::swimmer(1, 5.0, 1.0))
///     .with_duck(Competitor::swimmer(2, 4.0, 2.0));
/// let mut service = RaceService::new(InMemoryEventStore::new(), directory, RaceRunner::new());
///
/// let event = service.create_event("Pond Cup").unwrap();
/// service.add_lane(event, 10.0).unwrap();
/// service.add_lane(event, 20.0).unwrap();
/// service.add_participant(event, 1).unwrap();
/// service.add_participant(event, 2).unwrap();
///
/// let result = service.start_race(event).unwrap();
/// assert_eq!(result.competitor_ids(), vec![1, 2]);
/// ```
#[derive(Debug)]
pub struct RaceService<S, D> {
    store: S,
    directory: D,
    runner: RaceRunner,
}

impl<S: EventStore, D: Directory> RaceService<S, D> {
    /// Creates a service.
    pub fn new(store: S, directory: D, runner: RaceRunner) -> Self {
        Self {
            store,
            directory,
            runner,
        }
    }

    /// The underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The user directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The user directory, for callers that manage users.
    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// Creates a race event and returns its id.
    ///
    /// Ids continue from the largest existing id.
    ///
    /// # Errors
    /// - `InvalidEventName` if `name` is blank.
    /// - `EventAlreadyExists` if an event with the same name exists.
    pub fn create_event(&mut self, name: &str) -> Result<EventId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RaceError::InvalidEventName);
        }
        let events = self.store.events();
        if events.iter().any(|e| e.name() == name) {
            return Err(RaceError::EventAlreadyExists(name.to_string()));
        }
        let id = events.iter().map(|e| e.id()).max().unwrap_or(0) + 1;

        self.store.insert(RaceEvent::new(id, name));
        info!(event = id, name, "race event created");
        Ok(id)
    }

    /// Removes a race event.
    pub fn remove_event(&mut self, event_id: EventId) -> Result<RaceEvent> {
        self.store
            .remove(event_id)
            .ok_or(RaceError::EventNotFound(event_id))
    }

    /// Looks up a race event.
    pub fn event(&self, event_id: EventId) -> Result<&RaceEvent> {
        self.store
            .find(event_id)
            .ok_or(RaceError::EventNotFound(event_id))
    }

    fn event_mut(&mut self, event_id: EventId) -> Result<&mut RaceEvent> {
        self.store
            .find_mut(event_id)
            .ok_or(RaceError::EventNotFound(event_id))
    }

    /// Lanes of an event, in increasing distance order.
    pub fn lanes(&self, event_id: EventId) -> Result<Vec<Lane>> {
        Ok(self.event(event_id)?.lanes().to_vec())
    }

    /// Appends a lane to an event.
    pub fn add_lane(&mut self, event_id: EventId, distance: f64) -> Result<Lane> {
        self.event_mut(event_id)?.add_lane(distance).copied()
    }

    /// Removes the lane at a 1-based index.
    pub fn remove_lane(&mut self, event_id: EventId, index: usize) -> Result<Lane> {
        self.event_mut(event_id)?.remove_lane(index)
    }

    /// Registers a duck as a participant.
    ///
    /// # Errors
    /// `EventNotFound`, `UserNotFound`, `NotADuck`, then the checks of
    /// [`RaceEvent::add_participant`].
    pub fn add_participant(&mut self, event_id: EventId, user_id: UserId) -> Result<()> {
        self.event(event_id)?;
        let duck = self.resolve_duck(user_id)?;
        self.event_mut(event_id)?.add_participant(duck)
    }

    /// Unregisters a participant.
    pub fn remove_participant(&mut self, event_id: EventId, user_id: UserId) -> Result<()> {
        self.event(event_id)?;
        self.resolve_duck(user_id)?;
        self.event_mut(event_id)?.remove_participant(user_id)?;
        Ok(())
    }

    /// Subscribes a user to an event.
    pub fn add_spectator(&mut self, event_id: EventId, user_id: UserId) -> Result<()> {
        self.event(event_id)?;
        self.resolve_user(user_id)?;
        self.event_mut(event_id)?.add_spectator(user_id)
    }

    /// Unsubscribes a user from an event.
    pub fn remove_spectator(&mut self, event_id: EventId, user_id: UserId) -> Result<()> {
        self.event(event_id)?;
        self.resolve_user(user_id)?;
        self.event_mut(event_id)?.remove_spectator(user_id)
    }

    /// Removes a deleted user from every event it takes part in or watches.
    ///
    /// The directory is not consulted, so this also works after the user is
    /// gone. Returns whether any event changed.
    pub fn remove_user_from_all_events(&mut self, user_id: UserId) -> bool {
        let ids: Vec<EventId> = self.store.events().iter().map(|e| e.id()).collect();

        let mut touched = 0;
        for id in ids {
            let Some(event) = self.store.find_mut(id) else {
                continue;
            };
            let was_participant = event.remove_participant(user_id).is_ok();
            let was_spectator = event.remove_spectator(user_id).is_ok();
            if was_participant || was_spectator {
                touched += 1;
            }
        }

        if touched > 0 {
            info!(user = user_id, events = touched, "user removed from events");
        }
        touched > 0
    }

    /// Starts the race of an event.
    ///
    /// Participants are raced with their current directory records, not the
    /// ones captured at registration. The stored event is left unchanged.
    ///
    /// # Errors
    /// - `EventNotFound`.
    /// - `UserNotFound` or `NotADuck` if a participant no longer resolves.
    /// - `CapabilityMismatch` or `InvalidCompetitor` if a participant's
    ///   current record is no longer eligible.
    /// - The errors of [`RaceRunner::start`].
    pub fn start_race(&self, event_id: EventId) -> Result<RaceResult> {
        let mut event = self.event(event_id)?.clone();
        let ids: Vec<UserId> = event.participants().iter().map(|c| c.id).collect();
        for id in ids {
            event.update_participant(self.resolve_duck(id)?)?;
        }
        self.runner.start(&event)
    }

    fn resolve_user(&self, user_id: UserId) -> Result<()> {
        if self.directory.user_exists(user_id) {
            Ok(())
        } else {
            Err(RaceError::UserNotFound(user_id))
        }
    }

    fn resolve_duck(&self, user_id: UserId) -> Result<Competitor> {
        self.resolve_user(user_id)?;
        self.directory
            .competitor(user_id)
            .ok_or(RaceError::NotADuck(user_id))
    }
}
