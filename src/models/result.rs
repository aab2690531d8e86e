//! Race result model.
//!
//! A race result lists, lane by lane, the duck chosen by the optimizer and
//! its round-trip time. The makespan is the slowest of those times.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Competitor, UserId};

/// The competitor assigned to one lane and its completion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Assigned duck.
    pub competitor: Competitor,
    /// Distance of the lane.
    pub lane_distance: f64,
    /// Round-trip time: `2 × lane_distance / speed`.
    pub time: f64,
}

/// Counters collected during one optimizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Partial assignments entered (including the empty root).
    pub nodes: u64,
    /// Complete assignments whose makespan was computed.
    pub complete_assignments: u64,
    /// Branches skipped by the makespan bound.
    pub pruned: u64,
}

/// The optimal lane assignment for one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// One entry per lane, in lane order.
    pub assignments: Vec<AssignmentResult>,
    /// Maximum lane time.
    pub makespan: f64,
    /// Search counters.
    pub stats: SearchStats,
}

impl AssignmentResult {
    /// Creates a lane result, computing the round-trip time.
    pub fn new(competitor: Competitor, lane_distance: f64) -> Self {
        let time = 2.0 * lane_distance / competitor.speed;
        Self {
            competitor,
            lane_distance,
            time,
        }
    }
}

impl RaceResult {
    /// Number of lanes raced.
    #[inline]
    pub fn lane_count(&self) -> usize {
        self.assignments.len()
    }

    /// Ids of the assigned ducks in lane order.
    pub fn competitor_ids(&self) -> Vec<UserId> {
        self.assignments.iter().map(|a| a.competitor.id).collect()
    }

    /// The lane entry that determines the makespan (first one on ties).
    pub fn slowest(&self) -> Option<&AssignmentResult> {
        self.assignments
            .iter()
            .fold(None, |best: Option<&AssignmentResult>, a| match best {
                Some(b) if b.time >= a.time => Some(b),
                _ => Some(a),
            })
    }
}

impl fmt::Display for AssignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = if self.competitor.name.is_empty() {
            format!("#{}", self.competitor.id)
        } else {
            self.competitor.name.clone()
        };
        write!(
            f,
            "Duck {} on lane {:.3}: {:.3} s",
            who, self.lane_distance, self.time
        )
    }
}

impl fmt::Display for RaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in &self.assignments {
            writeln!(f, "{a}")?;
        }
        write!(f, "Best time: {:.3} s", self.makespan)
    }
}
