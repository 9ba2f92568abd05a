//! Chart-level machinery: tangent frames (C1), projection (C3) and the
//! chart type itself (C2) that bundles them with a shrinkable validity
//! region.

pub mod chart;
pub mod frame;
pub mod id;
pub mod polytope;
pub mod projector;

pub use chart::AtlasChart;
pub use id::ChartId;
