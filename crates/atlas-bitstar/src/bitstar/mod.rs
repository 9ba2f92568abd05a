//! BIT* graph core: the injected cost/id collaborators (C7, C8) and the
//! search-tree vertex type that uses them (C6).

pub mod cost;
pub mod id;
pub mod vertex;

pub use cost::{CostHelper, EuclideanCost};
pub use id::{AtomicIdGenerator, IdGenerator, SequentialIdGenerator};
pub use vertex::BITstarVertex;
