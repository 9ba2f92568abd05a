//! Planner-facing collaborator traits built on top of `atlas_bitstar`.
//!
//! `atlas_bitstar` stays deliberately ignorant of collision geometry,
//! scenario definition and multi-robot coordination policy (all explicit
//! Non-goals of the core); this crate is where those concerns live as
//! injected collaborators, grounded in how a minimal OMPL-style Rust
//! binding shapes its own `State`/`StateSpace`/`StateValidityChecker`
//! surface.

pub mod error;
pub mod prioritized;
pub mod space;
pub mod validity;

pub use error::{PlannerStatus, PlanningError};
pub use prioritized::PrioritizedPlanner;
pub use space::{State, StateSpace};
pub use validity::{
    CompositeValidityChecker, MultiRobotValidityChecker, RobotId, StateValidityChecker,
    StaticValidityChecker, TimeIndexedValidityChecker,
};
