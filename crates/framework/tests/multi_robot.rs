//! Scenario 5 from the design notes: a time-indexed dynamic-obstacle
//! checker keyed by `round(t * scaling_factor)`, and the multi-robot
//! checker built on the same bucketing convention.

use nalgebra::DVector;
use std::collections::HashMap;

use framework::{MultiRobotValidityChecker, PrioritizedPlanner, StateValidityChecker, TimeIndexedValidityChecker};

#[test]
fn time_indexed_checker_looks_up_the_rounded_bucket() {
    let mut occupied = HashMap::new();
    occupied.insert(4u64, DVector::from_vec(vec![0.0, 0.0]));

    let checker = TimeIndexedValidityChecker::new(
        move |s: &DVector<f64>, bucket: u64| match occupied.get(&bucket) {
            Some(obstacle) => (obstacle - s).norm() >= 1.0,
            None => true,
        },
        10.0,
    );

    let near_obstacle = DVector::from_vec(vec![0.1, 0.0]);
    // t=0.37 * scalingFactor(10) = 3.7, rounds to bucket 4.
    assert!(!checker.is_valid(&near_obstacle, 0.37));
    assert!(checker.is_valid(&near_obstacle, 0.0)); // bucket 0: no obstacle there
}

#[test]
fn prioritized_planner_routes_around_committed_reservations() {
    let mut planner = PrioritizedPlanner::new(vec![0, 1], 1.0, 10.0);
    planner.commit_path(0, &[(0.37, DVector::from_vec(vec![0.0, 0.0]))]);

    let checker: MultiRobotValidityChecker<'_> = planner.validity_checker_for(1);
    let blocked = DVector::from_vec(vec![0.1, 0.0]);
    let clear = DVector::from_vec(vec![10.0, 10.0]);
    assert!(!checker.is_valid(&blocked, 0.37));
    assert!(checker.is_valid(&clear, 0.37));
    // A different time bucket is unaffected by robot 0's reservation.
    assert!(checker.is_valid(&blocked, 9.0));
}
