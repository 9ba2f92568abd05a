//! State validity checking as an injected collaborator, with three shapes
//! grounded in how the spec's multi-robot scenario needs to query
//! occupancy: a purely geometric static checker, a time-indexed dynamic
//! obstacle checker, and a multi-robot checker that consults other robots'
//! committed reservations.
//!
//! `atlas_bitstar::AtlasStateSpace::follow_manifold` only knows about a
//! plain `Fn(&DVector<f64>) -> bool`; `at_time` below is how a
//! time-indexed checker adapts down to that shape for one fixed instant.

use std::collections::HashMap;

use nalgebra::DVector;

/// A robot identity within a `PrioritizedPlanner` run.
pub type RobotId = usize;

/// Queries whether `state` is valid at simulation time `time`. Static
/// checkers ignore `time`; dynamic ones bucket it (spec's
/// `round(t * scaling_factor)` convention) to look up obstacle occupancy.
pub trait StateValidityChecker {
    fn is_valid(&self, state: &DVector<f64>, time: f64) -> bool;

    /// Freeze this checker at one instant, producing the plain
    /// `Fn(&DVector<f64>) -> bool` that `AtlasMotionValidator` expects.
    fn at_time<'a>(&'a self, time: f64) -> Box<dyn Fn(&DVector<f64>) -> bool + 'a> {
        Box::new(move |state| self.is_valid(state, time))
    }
}

/// A validity check with no time dependence: pure geometric/collision
/// predicate supplied by the caller.
pub struct StaticValidityChecker<F> {
    check: F,
}

impl<F> StaticValidityChecker<F>
where
    F: Fn(&DVector<f64>) -> bool,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> StateValidityChecker for StaticValidityChecker<F>
where
    F: Fn(&DVector<f64>) -> bool,
{
    fn is_valid(&self, state: &DVector<f64>, _time: f64) -> bool {
        (self.check)(state)
    }
}

/// A validity check against obstacles whose occupancy is indexed by a
/// discretized time bucket: `bucket = round(time * scaling_factor)`.
pub struct TimeIndexedValidityChecker<F> {
    check: F,
    scaling_factor: f64,
}

impl<F> TimeIndexedValidityChecker<F>
where
    F: Fn(&DVector<f64>, u64) -> bool,
{
    pub fn new(check: F, scaling_factor: f64) -> Self {
        assert!(scaling_factor > 0.0, "scaling_factor must be positive");
        Self { check, scaling_factor }
    }

    fn bucket(&self, time: f64) -> u64 {
        (time * self.scaling_factor).round() as u64
    }
}

impl<F> StateValidityChecker for TimeIndexedValidityChecker<F>
where
    F: Fn(&DVector<f64>, u64) -> bool,
{
    fn is_valid(&self, state: &DVector<f64>, time: f64) -> bool {
        (self.check)(state, self.bucket(time))
    }
}

/// Checks `state` against every other robot's committed path at the same
/// discretized time bucket, rejecting states closer than `min_separation`
/// to a higher-priority robot's reserved position.
pub struct MultiRobotValidityChecker<'a> {
    pub(crate) own_robot: RobotId,
    pub(crate) reservations: &'a HashMap<(u64, RobotId), DVector<f64>>,
    pub(crate) min_separation: f64,
    pub(crate) scaling_factor: f64,
}

impl<'a> StateValidityChecker for MultiRobotValidityChecker<'a> {
    fn is_valid(&self, state: &DVector<f64>, time: f64) -> bool {
        let bucket = (time * self.scaling_factor).round() as u64;
        self.reservations.iter().all(|((b, robot), pos)| {
            *b != bucket || *robot == self.own_robot || (pos - state).norm() >= self.min_separation
        })
    }
}

/// Conjunction of several checkers, e.g. static environment geometry plus
/// multi-robot separation: valid only if every member accepts the state.
pub struct CompositeValidityChecker<'a> {
    checkers: Vec<&'a dyn StateValidityChecker>,
}

impl<'a> CompositeValidityChecker<'a> {
    pub fn new(checkers: Vec<&'a dyn StateValidityChecker>) -> Self {
        Self { checkers }
    }
}

impl<'a> StateValidityChecker for CompositeValidityChecker<'a> {
    fn is_valid(&self, state: &DVector<f64>, time: f64) -> bool {
        self.checkers.iter().all(|c| c.is_valid(state, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_checker_ignores_time() {
        let checker = StaticValidityChecker::new(|s: &DVector<f64>| s.norm() < 1.0);
        let inside = DVector::from_vec(vec![0.1, 0.0]);
        assert!(checker.is_valid(&inside, 0.0));
        assert!(checker.is_valid(&inside, 1000.0));
    }

    #[test]
    fn time_indexed_checker_buckets_consistently() {
        let checker = TimeIndexedValidityChecker::new(|_s: &DVector<f64>, bucket: u64| bucket != 5, 10.0);
        let s = DVector::from_vec(vec![0.0]);
        assert!(!checker.is_valid(&s, 0.5)); // 0.5 * 10 = 5
        assert!(checker.is_valid(&s, 0.6));
    }

    #[test]
    fn multi_robot_checker_rejects_states_too_close_to_a_reservation() {
        let mut reservations = HashMap::new();
        reservations.insert((0u64, 1usize), DVector::from_vec(vec![0.0, 0.0]));
        let checker = MultiRobotValidityChecker {
            own_robot: 2,
            reservations: &reservations,
            min_separation: 0.5,
            scaling_factor: 1.0,
        };
        let too_close = DVector::from_vec(vec![0.1, 0.0]);
        let far_enough = DVector::from_vec(vec![10.0, 0.0]);
        assert!(!checker.is_valid(&too_close, 0.0));
        assert!(checker.is_valid(&far_enough, 0.0));
    }

    #[test]
    fn multi_robot_checker_ignores_its_own_reservation() {
        let mut reservations = HashMap::new();
        reservations.insert((0u64, 1usize), DVector::from_vec(vec![0.0, 0.0]));
        let checker = MultiRobotValidityChecker {
            own_robot: 1,
            reservations: &reservations,
            min_separation: 0.5,
            scaling_factor: 1.0,
        };
        let same_spot = DVector::from_vec(vec![0.0, 0.0]);
        assert!(checker.is_valid(&same_spot, 0.0));
    }
}
