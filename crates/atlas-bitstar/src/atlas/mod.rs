//! C4/C5: the atlas itself — chart bookkeeping, sampling and geodesic
//! traversal, plus the state arena used to back sampler/motion-validator
//! collaborators.

pub mod sampler;
pub mod space;
pub mod state;

pub use space::{AtlasStateSpace, TraversalResult};
pub use state::{ManifoldState, StateHandle, StatePool};
