//! Race scheduling: the assignment optimizer and the race runner.
//!
//! # Algorithm
//!
//! `AssignmentOptimizer` picks one participant per lane so that the slowest
//! round-trip time (the makespan) is minimal, under the constraint that
//! resistance never decreases from shorter to longer lanes. The search is
//! exhaustive with a deterministic candidate order and tie-break.
//!
//! # Runner
//!
//! `RaceRunner` checks race preconditions, notifies spectators and returns
//! the verified optimizer result.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//!   (parallel machine makespan)
//! - Knuth (2011), "The Art of Computer Programming", Vol. 4A, Sec. 7.2.2
//!   (backtrack programming)

mod optimizer;
mod runner;

pub use optimizer::{sorted_candidates, verify, AssignmentOptimizer};
pub use runner::RaceRunner;
