//! C9: `PrioritizedPlanner` — the multi-robot planning shim.
//!
//! Not a planner itself: it does not call into `atlas_bitstar`'s BIT* core
//! directly. Instead it owns the priority order and the growing set of
//! committed reservations, and hands each robot (in priority order) a
//! `MultiRobotValidityChecker` that already accounts for every
//! higher-priority robot's committed path. The caller drives the actual
//! per-robot search (e.g. with `atlas_bitstar::atlas::sampler::AtlasMotionValidator`)
//! and reports the result back via `commit_path`.

use std::collections::HashMap;

use nalgebra::DVector;

use crate::validity::{MultiRobotValidityChecker, RobotId};

pub struct PrioritizedPlanner {
    priority_order: Vec<RobotId>,
    reservations: HashMap<(u64, RobotId), DVector<f64>>,
    min_separation: f64,
    scaling_factor: f64,
}

impl PrioritizedPlanner {
    pub fn new(priority_order: Vec<RobotId>, min_separation: f64, scaling_factor: f64) -> Self {
        assert!(min_separation >= 0.0, "min_separation must be non-negative");
        assert!(scaling_factor > 0.0, "scaling_factor must be positive");
        Self {
            priority_order,
            reservations: HashMap::new(),
            min_separation,
            scaling_factor,
        }
    }

    pub fn priority_order(&self) -> &[RobotId] {
        &self.priority_order
    }

    /// A validity checker for `robot` reflecting every reservation
    /// committed so far. Robots earlier in `priority_order` should have
    /// already called `commit_path` before this is used for `robot`.
    pub fn validity_checker_for(&self, robot: RobotId) -> MultiRobotValidityChecker<'_> {
        MultiRobotValidityChecker {
            own_robot: robot,
            reservations: &self.reservations,
            min_separation: self.min_separation,
            scaling_factor: self.scaling_factor,
        }
    }

    /// Record `robot`'s planned path as a sequence of `(time, state)`
    /// samples, so every lower-priority robot's checker sees it from this
    /// point on.
    pub fn commit_path(&mut self, robot: RobotId, path: &[(f64, DVector<f64>)]) {
        for (time, state) in path {
            let bucket = (time * self.scaling_factor).round() as u64;
            self.reservations.insert((bucket, robot), state.clone());
        }
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }
}
