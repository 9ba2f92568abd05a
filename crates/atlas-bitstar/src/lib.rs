//! Atlas constraint-manifold state space and BIT* graph core.
//!
//! Two halves that only meet at the boundary a planner crosses: the atlas
//! (`chart`, `atlas`) turns an implicit constraint manifold into something
//! a sampling-based planner can sample and interpolate on; the graph core
//! (`bitstar`) is a batch-informed search tree that does not know it is
//! running on a manifold at all. Both stay free of any concrete
//! collision-checking or scenario-definition logic, which planners supply
//! as injected collaborators (see the `framework` crate).

pub mod atlas;
pub mod bitstar;
pub mod chart;
pub mod config;
pub mod constraint;
pub mod error;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for crates building on top of this one.
pub mod prelude {
    pub use crate::atlas::{AtlasStateSpace, ManifoldState, StateHandle, StatePool, TraversalResult};
    pub use crate::atlas::sampler::{AtlasMotionValidator, AtlasStateSampler};
    pub use crate::bitstar::{AtomicIdGenerator, BITstarVertex, CostHelper, EuclideanCost, IdGenerator, SequentialIdGenerator};
    pub use crate::chart::{AtlasChart, ChartId};
    pub use crate::config::{AtlasParams, ParamError};
    pub use crate::constraint::{ConstraintFunction, UnitSphere};
    pub use crate::error::{ProjectionError, TraversalStop};
}
