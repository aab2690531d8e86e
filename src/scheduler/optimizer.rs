//! Resistance-monotonic makespan optimizer.
//!
//! # Algorithm
//!
//! 1. Stable-sort candidates by resistance ascending, then speed descending.
//! 2. Depth-first over lanes `0..M`. For each lane try every unused candidate,
//!    left to right, whose resistance is at least the previous lane's pick.
//! 3. At a complete assignment the makespan is the largest round-trip time
//!    `2 × distance / speed`. It replaces the best only if strictly smaller,
//!    so the first optimum found in sorted order wins ties.
//! 4. With bound pruning, a branch whose partial makespan already reaches the
//!    best one is skipped. No skipped branch could have replaced the best.
//!
//! # Complexity
//! O(N! / (N-M)!) complete assignments in the worst case, N = participants,
//! M = lanes. Race events are small; pruning cuts most branches in practice.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::OptimizerConfig;
use crate::error::{RaceError, Result};
use crate::models::{AssignmentResult, Competitor, Lane, RaceResult, SearchStats};

/// Assigns one participant per lane, minimizing the slowest lane time.
///
/// The optimizer holds no state between calls, so one instance can serve
/// any number of races, including concurrently.
///
/// # Example
///
/// ```
/// use u_race::models::{Competitor, Lane};
/// use u_race::scheduler::AssignmentOptimizer;
///
/// let lanes = vec![Lane::new(1, 10.0), Lane::new(2, 20.0)];
/// let ducks = vec![
///     Competitor::swimmer(1, 5.0, 1.0),
///     Competitor::swimmer(2, 4.0, 1.0),
///     Competitor::swimmer(3, 2.0, 3.0),
/// ];
///
/// let result = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
/// assert_eq!(result.competitor_ids(), vec![2, 1]);
/// assert_eq!(result.makespan, 8.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentOptimizer {
    config: OptimizerConfig,
}

impl AssignmentOptimizer {
    /// Creates an optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an optimizer from configuration.
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Enables or disables bound pruning.
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.config.bound_pruning = enabled;
        self
    }

    /// Finds the minimum-makespan resistance-monotonic assignment.
    ///
    /// Returns one entry per lane, in lane order.
    ///
    /// # Errors
    /// - `NotEnoughLanes` if `lanes` is empty.
    /// - `NotEnoughParticipants` if there are more lanes than participants.
    pub fn optimize(&self, participants: &[Competitor], lanes: &[Lane]) -> Result<RaceResult> {
        if lanes.is_empty() {
            return Err(RaceError::NotEnoughLanes);
        }
        if lanes.len() > participants.len() {
            return Err(RaceError::NotEnoughParticipants {
                lanes: lanes.len(),
                participants: participants.len(),
            });
        }

        let candidates = sorted_candidates(participants);
        let mut search = Search::new(&candidates, lanes, self.config.bound_pruning);
        search.explore(0, f64::NEG_INFINITY, 0.0);

        // The sorted order itself is monotonic, so a complete assignment
        // always exists once the preconditions hold.
        let (makespan, selection) = search
            .best
            .ok_or_else(|| RaceError::Internal("no complete assignment found".into()))?;

        debug!(
            lanes = lanes.len(),
            participants = participants.len(),
            nodes = search.stats.nodes,
            complete = search.stats.complete_assignments,
            pruned = search.stats.pruned,
            makespan,
            "assignment search finished"
        );

        let assignments = selection
            .iter()
            .zip(lanes)
            .map(|(&i, lane)| AssignmentResult::new(candidates[i].clone(), lane.distance))
            .collect();

        Ok(RaceResult {
            assignments,
            makespan,
            stats: search.stats,
        })
    }
}

/// Returns participants in search order.
///
/// Resistance ascending; on equal resistance the faster duck comes first.
/// Full ties keep the input order.
pub fn sorted_candidates(participants: &[Competitor]) -> Vec<&Competitor> {
    let mut candidates: Vec<&Competitor> = participants.iter().collect();
    candidates.sort_by(|a, b| {
        a.resistance
            .total_cmp(&b.resistance)
            .then_with(|| b.speed.total_cmp(&a.speed))
    });
    candidates
}

/// Checks the structural guarantees of an optimizer result.
///
/// # Errors
/// `Internal` if the result does not have one entry per lane, repeats a
/// competitor, mismatches a lane distance, or decreases in resistance.
pub fn verify(result: &RaceResult, lanes: &[Lane]) -> Result<()> {
    if result.assignments.len() != lanes.len() {
        return Err(RaceError::Internal(format!(
            "{} assignments for {} lanes",
            result.assignments.len(),
            lanes.len()
        )));
    }

    let mut seen = HashSet::new();
    for (a, lane) in result.assignments.iter().zip(lanes) {
        if !seen.insert(a.competitor.id) {
            return Err(RaceError::Internal(format!(
                "duck {} assigned to more than one lane",
                a.competitor.id
            )));
        }
        if a.lane_distance != lane.distance {
            return Err(RaceError::Internal(format!(
                "lane {} has distance {} but was raced at {}",
                lane.id, lane.distance, a.lane_distance
            )));
        }
    }

    if result
        .assignments
        .windows(2)
        .any(|w| w[1].competitor.resistance < w[0].competitor.resistance)
    {
        return Err(RaceError::Internal(
            "resistance decreases along the lanes".into(),
        ));
    }

    Ok(())
}

/// Working state of one optimizer call.
///
/// `used` and `current` form a single buffer that is restored after every
/// branch, so sibling branches see the same state.
struct Search<'a> {
    candidates: &'a [&'a Competitor],
    lanes: &'a [Lane],
    prune: bool,
    used: Vec<bool>,
    current: Vec<usize>,
    best: Option<(f64, Vec<usize>)>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(candidates: &'a [&'a Competitor], lanes: &'a [Lane], prune: bool) -> Self {
        Self {
            candidates,
            lanes,
            prune,
            used: vec![false; candidates.len()],
            current: Vec::with_capacity(lanes.len()),
            best: None,
            stats: SearchStats::default(),
        }
    }

    fn best_makespan(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |(m, _)| *m)
    }

    fn explore(&mut self, lane: usize, min_resistance: f64, partial_max: f64) {
        self.stats.nodes += 1;

        if lane == self.lanes.len() {
            self.stats.complete_assignments += 1;
            let makespan = self
                .current
                .iter()
                .zip(self.lanes)
                .map(|(&i, l)| l.round_trip_time(self.candidates[i].speed))
                .fold(0.0, f64::max);
            if makespan < self.best_makespan() {
                trace!(makespan, selection = ?self.current, "new best assignment");
                self.best = Some((makespan, self.current.clone()));
            }
            return;
        }

        for i in 0..self.candidates.len() {
            let candidate = self.candidates[i];
            if self.used[i] || candidate.resistance < min_resistance {
                continue;
            }

            let reach = partial_max.max(self.lanes[lane].round_trip_time(candidate.speed));
            if self.prune && reach >= self.best_makespan() {
                self.stats.pruned += 1;
                continue;
            }

            self.used[i] = true;
            self.current.push(i);
            self.explore(lane + 1, candidate.resistance, reach);
            self.current.pop();
            self.used[i] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn lanes(distances: &[f64]) -> Vec<Lane> {
        distances
            .iter()
            .enumerate()
            .map(|(i, &d)| Lane::new(i as u64 + 1, d))
            .collect()
    }

    fn duck(id: u64, speed: f64, resistance: f64) -> Competitor {
        Competitor::swimmer(id, speed, resistance)
    }

    /// Minimum makespan over every injective, resistance-monotonic assignment.
    fn brute_force(participants: &[Competitor], lanes: &[Lane]) -> f64 {
        fn rec(
            participants: &[Competitor],
            lanes: &[Lane],
            chosen: &mut Vec<usize>,
            best: &mut f64,
        ) {
            if chosen.len() == lanes.len() {
                let monotonic = chosen
                    .windows(2)
                    .all(|w| participants[w[0]].resistance <= participants[w[1]].resistance);
                if monotonic {
                    let makespan = chosen
                        .iter()
                        .zip(lanes)
                        .map(|(&i, l)| l.round_trip_time(participants[i].speed))
                        .fold(0.0, f64::max);
                    *best = best.min(makespan);
                }
                return;
            }
            for i in 0..participants.len() {
                if !chosen.contains(&i) {
                    chosen.push(i);
                    rec(participants, lanes, chosen, best);
                    chosen.pop();
                }
            }
        }

        let mut best = f64::INFINITY;
        rec(participants, lanes, &mut Vec::new(), &mut best);
        best
    }

    #[test]
    fn test_sort_order() {
        let ducks = vec![duck(1, 2.0, 3.0), duck(2, 4.0, 1.0), duck(3, 5.0, 1.0)];
        let ids: Vec<_> = sorted_candidates(&ducks).iter().map(|c| c.id).collect();
        // Equal resistance: faster first
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_full_tie_keeps_input_order() {
        let ducks = vec![duck(7, 3.0, 2.0), duck(3, 3.0, 2.0), duck(5, 3.0, 1.0)];
        let ids: Vec<_> = sorted_candidates(&ducks).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 7, 3]);
    }

    #[test]
    fn test_two_lane_scenario() {
        // A(5,1) B(4,1) C(2,3) → visited: (A,B)=10, (A,C)=20, (B,A)=8, (B,C)=20
        let lanes = lanes(&[10.0, 20.0]);
        let ducks = vec![duck(1, 5.0, 1.0), duck(2, 4.0, 1.0), duck(3, 2.0, 3.0)];

        let result = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
        assert_eq!(result.competitor_ids(), vec![2, 1]);
        assert_eq!(result.assignments[0].lane_distance, 10.0);
        assert_eq!(result.assignments[0].time, 5.0);
        assert_eq!(result.assignments[1].lane_distance, 20.0);
        assert_eq!(result.assignments[1].time, 8.0);
        assert_eq!(result.makespan, 8.0);
        assert!(verify(&result, &lanes).is_ok());
    }

    #[test]
    fn test_tie_keeps_first_found() {
        // Lane 1 dominates; X must race it. Y, Z and W all give makespan 20
        // on lane 0, and Y is reached first in sorted order.
        let lanes = lanes(&[1.0, 100.0]);
        let ducks = vec![
            duck(4, 1.0, 1.0),  // W
            duck(3, 2.0, 1.0),  // Z
            duck(1, 10.0, 1.0), // X
            duck(2, 8.0, 1.0),  // Y
        ];

        for prune in [true, false] {
            let result = AssignmentOptimizer::new()
                .with_bound_pruning(prune)
                .optimize(&ducks, &lanes)
                .unwrap();
            assert_eq!(result.competitor_ids(), vec![2, 1]);
            assert_eq!(result.makespan, 20.0);
        }
    }

    #[test]
    fn test_single_lane_picks_fastest() {
        let lanes = lanes(&[50.0]);
        let ducks = vec![duck(1, 2.0, 9.0), duck(2, 7.0, 1.0), duck(3, 5.0, 4.0)];
        let result = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
        assert_eq!(result.competitor_ids(), vec![2]);
        assert!((result.makespan - 100.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_constraint_binds() {
        // F on lane 0 and G on lane 1 would give 20, but G is less resistant.
        let lanes = lanes(&[10.0, 20.0]);
        let ducks = vec![duck(1, 1.0, 5.0), duck(2, 10.0, 1.0)];

        let result = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
        assert_eq!(result.competitor_ids(), vec![2, 1]);
        assert_eq!(result.makespan, 40.0);
    }

    #[test]
    fn test_preconditions() {
        let optimizer = AssignmentOptimizer::new();
        let ducks = vec![duck(1, 1.0, 1.0)];

        assert_eq!(
            optimizer.optimize(&ducks, &[]),
            Err(RaceError::NotEnoughLanes)
        );
        assert_eq!(
            optimizer.optimize(&ducks, &lanes(&[1.0, 2.0])),
            Err(RaceError::NotEnoughParticipants {
                lanes: 2,
                participants: 1
            })
        );
    }

    #[test]
    fn test_all_participants_used() {
        let lanes = lanes(&[1.0, 2.0, 3.0]);
        let ducks = vec![duck(1, 3.0, 3.0), duck(2, 2.0, 2.0), duck(3, 1.0, 1.0)];
        let result = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
        // Only the sorted order is monotonic
        assert_eq!(result.competitor_ids(), vec![3, 2, 1]);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let n: usize = rng.random_range(1..=7);
            let m: usize = rng.random_range(1..=n);

            let ducks: Vec<Competitor> = (0..n)
                .map(|id| {
                    duck(
                        id as u64,
                        f64::from(rng.random_range(1..=6u32)),
                        f64::from(rng.random_range(1..=3u32)),
                    )
                })
                .collect();

            let mut distance = 0.0;
            let distances: Vec<f64> = (0..m)
                .map(|_| {
                    distance += f64::from(rng.random_range(1..=10u32));
                    distance
                })
                .collect();
            let lanes = lanes(&distances);

            let expected = brute_force(&ducks, &lanes);
            let pruned = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
            let full = AssignmentOptimizer::new()
                .with_bound_pruning(false)
                .optimize(&ducks, &lanes)
                .unwrap();

            assert_eq!(pruned.makespan, expected);
            assert!(verify(&pruned, &lanes).is_ok());
            // Pruning never changes the answer
            assert_eq!(pruned.assignments, full.assignments);
            assert!(pruned.stats.complete_assignments <= full.stats.complete_assignments);
        }
    }

    #[test]
    fn test_deterministic() {
        let lanes = lanes(&[3.0, 6.0, 9.0]);
        let ducks = vec![
            duck(1, 4.0, 2.0),
            duck(2, 4.0, 2.0),
            duck(3, 6.0, 1.0),
            duck(4, 2.0, 3.0),
            duck(5, 5.0, 2.0),
        ];
        let optimizer = AssignmentOptimizer::new();
        let first = optimizer.optimize(&ducks, &lanes).unwrap();
        for _ in 0..10 {
            assert_eq!(optimizer.optimize(&ducks, &lanes).unwrap(), first);
        }
    }

    #[test]
    fn test_concurrent_races_independent() {
        let optimizer = AssignmentOptimizer::new();
        let lanes_a = lanes(&[10.0, 20.0]);
        let ducks_a = vec![duck(1, 5.0, 1.0), duck(2, 4.0, 1.0), duck(3, 2.0, 3.0)];
        let lanes_b = lanes(&[1.0, 100.0]);
        let ducks_b = vec![duck(4, 1.0, 1.0), duck(1, 10.0, 1.0), duck(2, 8.0, 1.0)];

        let (a, b) = std::thread::scope(|s| {
            let ha = s.spawn(|| optimizer.optimize(&ducks_a, &lanes_a));
            let hb = s.spawn(|| optimizer.optimize(&ducks_b, &lanes_b));
            (ha.join().unwrap().unwrap(), hb.join().unwrap().unwrap())
        });

        assert_eq!(a, optimizer.optimize(&ducks_a, &lanes_a).unwrap());
        assert_eq!(b, optimizer.optimize(&ducks_b, &lanes_b).unwrap());
    }

    #[test]
    fn test_pruning_reduces_work() {
        let lanes = lanes(&[1.0, 2.0, 3.0, 4.0]);
        let ducks: Vec<_> = (0..7).map(|i| duck(i, 1.0 + i as f64, 1.0)).collect();

        let pruned = AssignmentOptimizer::new().optimize(&ducks, &lanes).unwrap();
        let full = AssignmentOptimizer::new()
            .with_bound_pruning(false)
            .optimize(&ducks, &lanes)
            .unwrap();

        assert_eq!(pruned.assignments, full.assignments);
        // 7 * 6 * 5 * 4 permutations, all monotonic with equal resistance
        assert_eq!(full.stats.complete_assignments, 840);
        assert!(pruned.stats.pruned > 0);
        assert!(pruned.stats.nodes < full.stats.nodes);
    }

    #[test]
    fn test_verify_rejects_duplicates() {
        let lanes = lanes(&[1.0, 2.0]);
        let a = duck(1, 1.0, 1.0);
        let result = RaceResult {
            assignments: vec![
                AssignmentResult::new(a.clone(), 1.0),
                AssignmentResult::new(a, 2.0),
            ],
            makespan: 4.0,
            stats: SearchStats::default(),
        };
        assert!(matches!(verify(&result, &lanes), Err(RaceError::Internal(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_length_and_order() {
        let lanes = lanes(&[1.0, 2.0]);
        let short = RaceResult {
            assignments: vec![AssignmentResult::new(duck(1, 1.0, 1.0), 1.0)],
            makespan: 2.0,
            stats: SearchStats::default(),
        };
        assert!(verify(&short, &lanes).is_err());

        let decreasing = RaceResult {
            assignments: vec![
                AssignmentResult::new(duck(1, 1.0, 2.0), 1.0),
                AssignmentResult::new(duck(2, 1.0, 1.0), 2.0),
            ],
            makespan: 4.0,
            stats: SearchStats::default(),
        };
        assert!(verify(&decreasing, &lanes).is_err());
    }
}
