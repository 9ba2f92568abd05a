//! Planner-facing error and status types, shaped after the
//! `PlanningError`/`PlannerStatus` pair a minimal OMPL-style Rust binding
//! exposes to its callers.

use std::fmt;

/// Why a planning attempt could not proceed or did not finish.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanningError {
    /// The start state fails the validity checker before any search begins.
    InvalidStart,
    /// The goal state fails the validity checker before any search begins.
    InvalidGoal,
    /// The planner's time or iteration budget elapsed with no usable path.
    Timeout,
    /// The planner exhausted its search without ever reaching the goal
    /// region, even approximately.
    NoSolutionFound,
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningError::InvalidStart => write!(f, "start state is not valid"),
            PlanningError::InvalidGoal => write!(f, "goal state is not valid"),
            PlanningError::Timeout => write!(f, "planner exceeded its time budget"),
            PlanningError::NoSolutionFound => write!(f, "no solution found"),
        }
    }
}

impl std::error::Error for PlanningError {}

/// Outcome of a completed (non-errored) planning attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlannerStatus {
    /// A path reaching the goal region was found.
    ExactSolution,
    /// A path was found that gets within tolerance of the goal but does
    /// not exactly reach it (the atlas's `lambda` budget or similar cutoff
    /// was hit on the final edge).
    ApproximateSolution,
    /// The budget elapsed before any solution, exact or approximate, was
    /// found.
    Timeout,
}
