//! Race-event scheduling for the duck social network.
//!
//! Given the ordered lanes of a race and its participating ducks, selects one
//! duck per lane so that the slowest lane finishes as early as possible,
//! while ducks on longer lanes are never less resistant than ducks on
//! shorter ones.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Lane`, `Competitor`, `DuckKind`,
//!   `RaceEvent`, `AssignmentResult`, `RaceResult`
//! - **`scheduler`**: `AssignmentOptimizer` (backtracking search) and
//!   `RaceRunner` (preconditions, notifications, result packaging)
//! - **`validation`**: Whole-event integrity checks
//! - **`store`**: Collaborator traits (`EventStore`, `Directory`,
//!   `SpectatorNotifier`) with in-memory implementations
//! - **`service`**: Identifier-based entry point (`start_race(event_id)`)
//! - **`config`**: TOML configuration
//! - **`telemetry`**: Logging setup
//!
//! # Architecture
//!
//! The scheduler is a pure, synchronous, in-memory computation. Persistence,
//! identity and notification delivery belong to the surrounding application
//! and reach this crate only through the `store` traits.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Knuth (2011), "The Art of Computer Programming", Vol. 4A

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use error::{RaceError, Result};
