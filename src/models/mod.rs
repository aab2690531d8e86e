//! Race domain models.
//!
//! Provides the data types for describing a race event and the outcome of
//! scheduling it.
//!
//! # Domain Mappings
//!
//! | u-race | Scheduling | Meaning |
//! |--------|------------|---------|
//! | Lane | Machine/slot | One race leg with a fixed distance |
//! | Competitor | Resource | A duck with speed and resistance |
//! | RaceEvent | Problem instance | Lanes + participants + spectators |
//! | RaceResult | Schedule | Lane-by-lane assignment and makespan |

mod competitor;
mod event;
mod lane;
mod result;

pub use competitor::{Competitor, DuckKind};
pub use event::RaceEvent;
pub use lane::Lane;
pub use result::{AssignmentResult, RaceResult, SearchStats};

/// Race event identifier.
pub type EventId = u64;

/// User identifier (ducks and spectators share one id space).
pub type UserId = u64;

/// Lane identifier, unique within one event.
pub type LaneId = u64;
