//! External collaborators of the race scheduler.
//!
//! The scheduler only needs read access to the current event state when a
//! race starts, a way to resolve user ids, and a way to reach spectators.
//! Those concerns are modelled as traits; the in-memory implementations
//! back tests and embedded use.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Debug;

use tracing::info;

use crate::models::{Competitor, EventId, RaceEvent, UserId};

/// Storage for race events.
pub trait EventStore {
    /// Looks up an event.
    fn find(&self, id: EventId) -> Option<&RaceEvent>;

    /// Looks up an event for mutation.
    fn find_mut(&mut self, id: EventId) -> Option<&mut RaceEvent>;

    /// Inserts or replaces an event.
    fn insert(&mut self, event: RaceEvent);

    /// Removes an event.
    fn remove(&mut self, id: EventId) -> Option<RaceEvent>;

    /// All stored events.
    fn events(&self) -> Vec<&RaceEvent>;
}

/// Identity resolver for users and ducks.
pub trait Directory {
    /// Whether a user with this id exists.
    fn user_exists(&self, id: UserId) -> bool;

    /// Resolves a user to a duck, if the user is one.
    fn competitor(&self, id: UserId) -> Option<Competitor>;
}

/// Delivers race notifications to spectators.
///
/// Implementations may deliver synchronously or hand the message to a
/// worker pool. The runner only requires that `notify` returns.
pub trait SpectatorNotifier: Send + Sync + Debug {
    /// Sends `message` about `event` to one spectator.
    fn notify(&self, event: &RaceEvent, spectator: UserId, message: &str);
}

/// Event store backed by an ordered map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: BTreeMap<EventId, RaceEvent>,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn find(&self, id: EventId) -> Option<&RaceEvent> {
        self.events.get(&id)
    }

    fn find_mut(&mut self, id: EventId) -> Option<&mut RaceEvent> {
        self.events.get_mut(&id)
    }

    fn insert(&mut self, event: RaceEvent) {
        self.events.insert(event.id(), event);
    }

    fn remove(&mut self, id: EventId) -> Option<RaceEvent> {
        self.events.remove(&id)
    }

    fn events(&self) -> Vec<&RaceEvent> {
        self.events.values().collect()
    }
}

/// Directory of users, some of which are ducks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: HashSet<UserId>,
    ducks: HashMap<UserId, Competitor>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user that is not a duck.
    pub fn with_user(mut self, id: UserId) -> Self {
        self.users.insert(id);
        self
    }

    /// Adds a duck.
    pub fn with_duck(mut self, duck: Competitor) -> Self {
        self.insert_duck(duck);
        self
    }

    /// Adds a duck or replaces its record.
    pub fn insert_duck(&mut self, duck: Competitor) {
        self.users.insert(duck.id);
        self.ducks.insert(duck.id, duck);
    }

    /// Deletes a user, duck or not. Returns whether the user existed.
    pub fn remove_user(&mut self, id: UserId) -> bool {
        self.ducks.remove(&id);
        self.users.remove(&id)
    }
}

impl Directory for InMemoryDirectory {
    fn user_exists(&self, id: UserId) -> bool {
        self.users.contains(&id)
    }

    fn competitor(&self, id: UserId) -> Option<Competitor> {
        self.ducks.get(&id).cloned()
    }
}

/// Notifier that emits each notification as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl SpectatorNotifier for LogNotifier {
    fn notify(&self, event: &RaceEvent, spectator: UserId, message: &str) {
        info!(event = event.id(), spectator, "{message}");
    }
}
